/// Autolinking core: discovering which installed packages a native build
/// has to link
///
/// - `domain`: resolutions, manifests, module descriptors, platforms
/// - `policies`: inclusion filter and duplicate/hoisting rules
/// - `services`: the scanners that walk `node_modules`
pub mod domain;
pub mod policies;
pub mod services;
