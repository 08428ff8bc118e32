// Domain layer: colours, records and ports. No I/O here.

pub mod colour;
pub mod model;
pub mod ports;
