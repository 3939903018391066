// Unit tests for business rules

#[cfg(test)]
mod tests {
    use crate::domain::model::*;
    use crate::domain::rules::*;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    fn existing(names: &[&str]) -> HashSet<PathBuf> {
        names.iter().map(|name| Path::new("gifs").join(name)).collect()
    }

    fn resolve(taken: &HashSet<PathBuf>, overwrite: bool) -> ResolvedName {
        NamingResolver::resolve(Path::new("gifs"), "clip", GIF_EXTENSION, overwrite, |path| {
            taken.contains(path)
        })
    }

    #[test]
    fn test_profile_resolver_defaults() {
        let resolver = ProfileResolver::default();

        let high = resolver.resolve(QualityMode::High);
        assert_eq!(high.mode, QualityMode::High);
        assert_eq!(high.frame_rate, 15);
        assert_eq!(high.scale_filter, ScaleAlgorithm::Lanczos);
        assert_eq!(high.dither, DitherSpec::Bayer { scale: 5 });

        let low = resolver.resolve(QualityMode::Low);
        assert_eq!(low.mode, QualityMode::Low);
        assert_eq!(low.frame_rate, 10);
        assert_eq!(low.scale_filter, ScaleAlgorithm::Bicubic);
        assert_eq!(low.dither, DitherSpec::None);

        assert_ne!(high, low);
    }

    #[test]
    fn test_profile_resolver_is_idempotent() {
        let resolver = ProfileResolver::default();
        for mode in QualityMode::ALL {
            assert_eq!(resolver.resolve(mode), resolver.resolve(mode));
        }
    }

    #[test]
    fn test_profile_resolver_uses_injected_table() {
        let mut table = ProfileTable::default();
        table.low.frame_rate = 8;
        let resolver = ProfileResolver::new(table);

        assert_eq!(resolver.resolve(QualityMode::Low).frame_rate, 8);
        assert_eq!(resolver.resolve(QualityMode::High).frame_rate, 15);
    }

    #[test]
    fn test_bytes_to_mb_is_binary() {
        assert_eq!(SizePolicy::bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(SizePolicy::bytes_to_mb(0), 0.0);
        assert_eq!(SizePolicy::bytes_to_mb(512 * 1024), 0.5);
    }

    #[test]
    fn test_size_classification_boundary() {
        assert!(SizePolicy::is_conformant(1.3, 2.0));
        assert!(SizePolicy::is_conformant(2.0, 2.0));
        assert!(!SizePolicy::is_conformant(2.7, 2.0));
        assert!(!SizePolicy::is_conformant(2.000001, 2.0));
    }

    #[test]
    fn test_naming_free_candidate() {
        let taken = existing(&[]);
        assert_eq!(
            resolve(&taken, false),
            ResolvedName::Original(PathBuf::from("gifs/clip.gif"))
        );
    }

    #[test]
    fn test_naming_overwrite_ignores_existing() {
        let taken = existing(&["clip.gif", "clip_1.gif"]);
        assert_eq!(
            resolve(&taken, true).into_path(),
            PathBuf::from("gifs/clip.gif")
        );
    }

    #[test]
    fn test_naming_first_suffix() {
        let taken = existing(&["clip.gif"]);
        assert_eq!(
            resolve(&taken, false),
            ResolvedName::Suffixed {
                path: PathBuf::from("gifs/clip_1.gif"),
                suffix: 1,
            }
        );
    }

    #[test]
    fn test_naming_second_suffix() {
        let taken = existing(&["clip.gif", "clip_1.gif"]);
        assert_eq!(
            resolve(&taken, false).path(),
            Path::new("gifs/clip_2.gif")
        );
    }

    #[test]
    fn test_naming_fills_gaps_in_order() {
        let taken = existing(&["clip.gif", "clip_1.gif", "clip_3.gif"]);
        assert_eq!(
            resolve(&taken, false).path(),
            Path::new("gifs/clip_2.gif")
        );
    }

    #[test]
    fn test_naming_exhaustion_falls_back_to_original() {
        let mut taken = existing(&["clip.gif"]);
        for suffix in 1..=MAX_NAME_SUFFIX {
            taken.insert(Path::new("gifs").join(format!("clip_{}.gif", suffix)));
        }

        assert_eq!(
            resolve(&taken, false),
            ResolvedName::Exhausted(PathBuf::from("gifs/clip.gif"))
        );
    }

    #[test]
    fn test_naming_last_suffix_is_still_tried() {
        let mut taken = existing(&["clip.gif"]);
        for suffix in 1..MAX_NAME_SUFFIX {
            taken.insert(Path::new("gifs").join(format!("clip_{}.gif", suffix)));
        }

        assert_eq!(
            resolve(&taken, false).path(),
            Path::new("gifs/clip_999.gif")
        );
    }

    #[test]
    fn test_naming_candidates_follow_probe_order() {
        let candidates: Vec<PathBuf> =
            NamingResolver::candidates(Path::new("gifs"), "clip", GIF_EXTENSION).collect();

        assert_eq!(candidates.len(), MAX_NAME_SUFFIX as usize + 1);
        assert_eq!(candidates[0], PathBuf::from("gifs/clip.gif"));
        assert_eq!(candidates[1], PathBuf::from("gifs/clip_1.gif"));
        assert_eq!(candidates[999], PathBuf::from("gifs/clip_999.gif"));
    }
}
