/// Ports module defining interfaces for hexagonal architecture
///
/// The application core talks to the file system and the console only
/// through the outbound (driven) ports declared here.
pub mod outbound;
