#[cfg(feature = "typescript")]
pub mod builder;
pub mod heuristic;
pub mod keywords;
pub mod names;
#[cfg(feature = "typescript")]
pub mod structural;
#[cfg(feature = "typescript")]
pub mod syntax;

use crate::error::Result;
use crate::ir::{Extraction, FileVariant};

pub use heuristic::HeuristicExtractor;
pub use keywords::Keywords;
#[cfg(feature = "typescript")]
pub use structural::StructuralExtractor;

/// Outline extractor trait. Each extractor turns one document into
/// flattened module and test entries.
pub trait OutlineExtractor: Send + Sync {
    fn supports(&self, variant: FileVariant) -> bool;
    fn extract(&self, content: &str, variant: FileVariant) -> Result<Extraction>;
}

/// Routes each document to the structural or heuristic extractor.
pub struct Outliner {
    #[cfg(feature = "typescript")]
    structural: StructuralExtractor,
    heuristic: HeuristicExtractor,
}

impl Outliner {
    pub fn new(keywords: &Keywords) -> Result<Self> {
        Ok(Self {
            #[cfg(feature = "typescript")]
            structural: StructuralExtractor::new(keywords.clone()),
            heuristic: HeuristicExtractor::new(keywords)?,
        })
    }

    /// The extractor responsible for `variant`.
    ///
    /// Without the `typescript` feature every variant is scanned
    /// heuristically.
    pub fn extractor_for(&self, variant: FileVariant) -> &dyn OutlineExtractor {
        #[cfg(feature = "typescript")]
        let structural = Some(&self.structural as &dyn OutlineExtractor)
            .filter(|extractor| extractor.supports(variant));
        #[cfg(not(feature = "typescript"))]
        let structural: Option<&dyn OutlineExtractor> = None;

        structural.unwrap_or(&self.heuristic)
    }

    /// Extract one document. Never fails: any error is logged and the
    /// document degrades to an empty outline.
    pub fn outline(&self, content: &str, variant: FileVariant) -> Extraction {
        match self.extractor_for(variant).extract(content, variant) {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::warn!(
                    variant = %variant,
                    error = %e,
                    "failed to extract test outline, reporting none"
                );
                Extraction::default()
            }
        }
    }
}
