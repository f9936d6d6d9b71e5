// Domain-layer modules and shared errors/models
pub mod normalizer {
    pub use crate::normalizer::*;
}

pub mod csv_export {
    pub use crate::csv_export::*;
}

pub mod mock {
    pub use crate::mock::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
