pub mod browse;
pub mod quote;
pub mod stocks;
