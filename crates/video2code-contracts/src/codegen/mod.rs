mod backend;
mod frontend;
mod openapi;

pub use backend::render_backend;
pub use frontend::render_frontend;
pub use openapi::{render_api_spec, API_SPEC_VERSION};

use crate::analysis::{Analysis, Artifacts};

/// Render every artifact for `analysis`. Pure: equal inputs give equal bytes.
pub fn generate_artifacts(analysis: Analysis) -> Artifacts {
    let frontend_source = render_frontend(&analysis);
    let api_spec = render_api_spec(&analysis);
    let backend_source = render_backend(&analysis);
    Artifacts {
        analysis,
        frontend_source,
        api_spec,
        backend_source,
    }
}

#[cfg(test)]
mod tests {
    use super::generate_artifacts;
    use crate::analysis::Analysis;

    #[test]
    fn empty_analysis_still_yields_all_artifacts() {
        let artifacts = generate_artifacts(Analysis::no_frames());
        assert!(artifacts.frontend_source.contains("GeneratedScreen"));
        assert!(artifacts.api_spec.contains("/refine"));
        assert!(artifacts.backend_source.contains("RefineController"));
        assert_eq!(artifacts.analysis, Analysis::no_frames());
    }

    #[test]
    fn generation_is_deterministic() {
        let analysis = Analysis::empty("same reply");
        assert_eq!(
            generate_artifacts(analysis.clone()),
            generate_artifacts(analysis)
        );
    }
}
