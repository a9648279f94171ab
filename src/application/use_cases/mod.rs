/// Use cases module containing application business logic orchestration
mod resolve_dependencies;

pub use resolve_dependencies::ResolveDependenciesUseCase;
