// Adapters layer: Subject implementations for data the host already has in hand.

pub mod json;
