//! Martin coupling metrics, computed per file
//!
//! - Instability `I = out / (in + out)`: 0 = maximally stable,
//!   1 = maximally unstable
//! - Abstractness `A = protocols / types-in-file`: 0 = fully concrete,
//!   1 = fully abstract (undefined for files without type declarations)
//! - Distance `D = |A + I - 1|`: how far the file sits from the main
//!   sequence `A + I = 1`

use crate::detectors::base::AnalysisContext;
use crate::ir::TypeKind;

#[derive(Debug, Clone, Copy)]
pub struct FileMetrics {
    pub in_degree: usize,
    pub out_degree: usize,
    pub instability: f64,
    /// `None` when the file declares no types
    pub abstractness: Option<f64>,
}

impl FileMetrics {
    pub fn coupling(&self) -> usize {
        self.in_degree + self.out_degree
    }

    pub fn distance(&self) -> Option<f64> {
        self.abstractness
            .map(|a| (a + self.instability - 1.0).abs())
    }
}

pub fn file_metrics(ctx: &AnalysisContext, path: &str) -> FileMetrics {
    let in_degree = ctx.files.in_degree(path);
    let out_degree = ctx.files.out_degree(path);

    let total_coupling = in_degree + out_degree;
    let instability = if total_coupling > 0 {
        out_degree as f64 / total_coupling as f64
    } else {
        0.0
    };

    let total_types = ctx
        .ir
        .type_decls
        .iter()
        .filter(|t| t.file_path == path)
        .count();
    let abstractness = (total_types > 0).then(|| {
        let protocols = ctx
            .ir
            .type_decls
            .iter()
            .filter(|t| t.file_path == path && t.kind == TypeKind::Protocol)
            .count();
        protocols as f64 / total_types as f64
    });

    FileMetrics {
        in_degree,
        out_degree,
        instability,
        abstractness,
    }
}
