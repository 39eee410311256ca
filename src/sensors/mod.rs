//! Sensor drivers.
//!
//! Each driver turns raw ADC / GPIO samples into a domain reading.  They
//! are wrapped behind port traits by [`adapters::hardware`](crate::adapters::hardware).

pub mod ambient;
pub mod potentiometer;

pub use ambient::AmbientSensor;
pub use potentiometer::Potentiometer;
