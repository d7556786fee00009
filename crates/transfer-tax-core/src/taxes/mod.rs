pub mod duties;
pub mod withholding;
