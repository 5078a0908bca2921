use mirror_fs::validate_path_segment;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_accepted_segments_stay_inside_parent(s in "\\PC*") {
        if validate_path_segment(&s).is_ok() {
            let parent = std::path::Path::new("/cache");
            let joined = parent.join(&s);
            prop_assert_eq!(joined.parent(), Some(parent));
            prop_assert!(!s.contains('/'));
            prop_assert!(!s.starts_with('-'));
        }
    }

    #[test]
    fn test_hex_ids_are_accepted(s in "[0-9a-f]{24}") {
        prop_assert!(validate_path_segment(&s).is_ok());
    }
}
