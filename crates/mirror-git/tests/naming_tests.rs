use mirror_git::naming::{destination_index, destination_remote_name, is_destination_remote};
use mirror_git::UPSTREAM_REMOTE;
use proptest::prelude::*;

#[test]
fn test_upstream_is_not_a_destination() {
    assert!(!is_destination_remote(UPSTREAM_REMOTE));
}

#[test]
fn test_stray_backup_names_are_managed() {
    assert!(is_destination_remote("backup-old"));
    assert!(is_destination_remote("backup07"));
    assert_eq!(destination_index("backup-old"), None);
}

proptest! {
    #[test]
    fn test_names_are_stable_and_parseable(index in 0usize..10_000) {
        let name = destination_remote_name(index);
        prop_assert!(is_destination_remote(&name));
        prop_assert_eq!(destination_index(&name), Some(index));
        prop_assert_eq!(destination_remote_name(index), name);
    }
}
