use relm::domain::{bump_version_string, BumpKind, Version};
use relm::RelmError;

const SAMPLES: [&str; 9] = [
    "0.0.0",
    "0.1",
    "1.0.0",
    "1.9.9",
    "1.0.1-alpha.1",
    "1.0.1-alpha.7",
    "1.0.1-beta.2",
    "1.0.1-rc.1",
    "3.2.1-rc.12",
];

#[test]
fn test_bump_never_decreases() {
    for current in SAMPLES {
        let before = Version::parse(current).unwrap();
        for kind in BumpKind::ALL {
            let Ok(next) = bump_version_string(current, kind) else {
                continue;
            };
            let after = Version::parse(&next).unwrap();
            assert!(
                after > before,
                "{} + {} gave {}, which does not sort above it",
                current,
                kind,
                next
            );
        }
    }
}

#[test]
fn test_documented_transitions() {
    let cases = [
        ("1.0.0", BumpKind::Alpha, "1.0.1-alpha.1"),
        ("1.0.1-alpha.1", BumpKind::Alpha, "1.0.1-alpha.2"),
        ("1.0.1-alpha.2", BumpKind::Beta, "1.0.1-beta.1"),
        ("1.0.1-rc.2", BumpKind::Release, "1.0.1"),
        ("1.0.1-rc.1", BumpKind::Patch, "1.0.2"),
        ("0.1", BumpKind::Patch, "0.1.1"),
    ];

    for (current, kind, expected) in cases {
        assert_eq!(bump_version_string(current, kind).unwrap(), expected);
    }
}

#[test]
fn test_only_backward_channel_moves_fail() {
    let failures: Vec<(&str, BumpKind)> = SAMPLES
        .iter()
        .flat_map(|current| BumpKind::ALL.iter().map(move |kind| (*current, *kind)))
        .filter(|(current, kind)| bump_version_string(current, *kind).is_err())
        .collect();

    assert_eq!(
        failures,
        vec![
            ("1.0.1-beta.2", BumpKind::Alpha),
            ("1.0.1-rc.1", BumpKind::Alpha),
            ("1.0.1-rc.1", BumpKind::Beta),
            ("3.2.1-rc.12", BumpKind::Alpha),
            ("3.2.1-rc.12", BumpKind::Beta),
        ]
    );
}

#[test]
fn test_malformed_versions_are_parse_errors() {
    for input in [
        "",
        "1",
        "one.two.three",
        "1.0.0-alpha",
        "1.0.0-alpha.0",
        "1.0.0-gamma.1",
        "+1.2.3",
        "1.+2.3",
        "1.0.0-alpha.+1",
    ] {
        let result = bump_version_string(input, BumpKind::Patch);
        assert!(
            matches!(result, Err(RelmError::Parse(_))),
            "expected parse error for {:?}, got {:?}",
            input,
            result
        );
    }
}

#[test]
fn test_bump_past_u64_max_is_an_error() {
    let major = bump_version_string("18446744073709551615.0.0", BumpKind::Major);
    assert!(
        matches!(major, Err(RelmError::InvalidTransition { .. })),
        "got {:?}",
        major
    );

    let alpha = bump_version_string("1.0.0-alpha.18446744073709551615", BumpKind::Alpha);
    assert!(
        matches!(alpha, Err(RelmError::InvalidTransition { .. })),
        "got {:?}",
        alpha
    );

    // Moving to a later channel does not need the exhausted sequence
    assert_eq!(
        bump_version_string("1.0.0-alpha.18446744073709551615", BumpKind::Beta).unwrap(),
        "1.0.0-beta.1"
    );
}

#[test]
fn test_bump_kind_from_cli_text() {
    assert_eq!("RC".parse::<BumpKind>().unwrap(), BumpKind::Rc);
    assert!(matches!(
        "gamma".parse::<BumpKind>(),
        Err(RelmError::Parse(_))
    ));
}
