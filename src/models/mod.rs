pub mod record;
pub mod score;
pub mod stopwords;

pub use record::*;
pub use score::*;
pub use stopwords::*;
