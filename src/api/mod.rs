// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod render {
    pub use crate::render::*;
}
