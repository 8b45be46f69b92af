pub mod rolling;

pub use rolling::rolling_volume_average;
