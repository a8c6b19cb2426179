// Domain layer - data model shared by the parser and the orchestration service

pub mod model;
