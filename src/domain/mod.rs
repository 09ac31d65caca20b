// Domain layer: census data model and ports (interfaces) implemented by config adapters.

pub mod model;
pub mod ports;
