// Domain layer: models and collaborator ports. No transport concerns here.

pub mod model;
pub mod ports;
