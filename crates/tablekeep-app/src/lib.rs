// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod ids;
pub mod model;
pub mod service;
pub mod state;
pub mod sync;

pub use ids::*;
pub use model::*;
pub use service::*;
pub use state::*;
pub use sync::*;
