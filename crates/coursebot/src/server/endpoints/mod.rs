pub mod receive;
pub mod status;
