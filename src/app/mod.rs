// Application layer - workflow orchestration over the engine port

mod service;

pub use service::MediaService;
