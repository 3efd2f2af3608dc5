// Application layer: wiring config, subject files and presenters for the binary.

pub mod present;
