pub mod d400_executive_summary;
pub mod d401_store_monthly;
pub mod d402_personal;
pub mod periods;
