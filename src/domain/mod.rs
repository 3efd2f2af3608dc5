// Domain layer: presenter data model and the seams to host code (subjects, helpers).

pub mod model;
pub mod ports;
