//! Environment variables read by the `debugging` feature.
//!
//! Every key is `DELAUNAY_<GROUP>_<KEY>`, e.g. `DELAUNAY_SVG_OUTPUT_PATH`.

const ROOT_PREFIX: &str = "DELAUNAY";

pub mod svg {
    use std::{env, path};

    use crate::debug;

    const GROUP_PREFIX: &str = "SVG";

    fn key(name: &str) -> String {
        format!("{}_{}_{}", super::ROOT_PREFIX, GROUP_PREFIX, name)
    }

    /// Directory receiving the snapshots. Nothing is written when unset.
    pub fn output_path() -> Option<path::PathBuf> {
        env::var(key("OUTPUT_PATH")).ok().map(path::PathBuf::from)
    }

    pub fn show_labels() -> bool {
        // Note the show/hide inversion
        env::var(key("HIDE_LABELS")).is_err()
    }

    pub(crate) fn output_level() -> debug::svg::SvgOutputLevel {
        use debug::svg::SvgOutputLevel;

        match env::var(key("OUTPUT_LEVEL")) {
            Ok(value) => match value.trim() {
                "3" => SvgOutputLevel::AllSteps,
                "2" => SvgOutputLevel::MajorSteps,
                "1" => SvgOutputLevel::ResultOnly,
                _ => SvgOutputLevel::None,
            },
            Err(_) => SvgOutputLevel::None,
        }
    }
}
