use proptest::prelude::*;
use safe_path_ops::path::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,6}"
}

fn segments(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment(), 1..=max)
}

fn drive() -> impl Strategy<Value = String> {
    "[c-f]".prop_map(|d| format!("{d}:"))
}

proptest! {
    #[test]
    fn combine_with_empty_is_identity(a in ".*") {
        prop_assert_eq!(combine(&a, ""), a.clone());
        prop_assert_eq!(combine("", &a), a);
    }

    #[test]
    fn slash_helpers_are_idempotent(s in r"[a-z\\/:]{0,12}") {
        let fwd = convert_back_slashes_to_forward_slashes(&s);
        prop_assert_eq!(convert_back_slashes_to_forward_slashes(&fwd), fwd.clone());
        let back = convert_forward_slashes_to_back_slashes(&s);
        prop_assert_eq!(convert_forward_slashes_to_back_slashes(&back), back.clone());
        let native = convert_slashes_to_platform(&s);
        prop_assert_eq!(convert_slashes_to_platform(&native), native.clone());

        let end = set_back_slash_end(&s, true);
        prop_assert_eq!(set_back_slash_end(&end, true), end.clone());
        let begin = set_forward_slash_begin(&s, true);
        prop_assert_eq!(set_forward_slash_begin(&begin, true), begin.clone());
    }

    #[test]
    fn split_then_recombine_gives_the_path_back(
        d in drive(),
        dirs in segments(4),
        name in segment(),
        ext in "[a-z]{1,3}",
        forward in any::<bool>(),
    ) {
        let backslashed = format!(r"{d}\{}\{name}.{ext}", dirs.join("\\"));
        let input = if forward {
            convert_back_slashes_to_forward_slashes(&backslashed)
        } else {
            backslashed.clone()
        };
        let sp = split_path(&input);
        prop_assert_eq!(sp.extension(), format!(".{ext}"));
        prop_assert_eq!(sp.recombine(), backslashed);
    }

    #[test]
    fn relative_then_absolute_round_trips(
        d in drive(),
        from_dirs in segments(4),
        to_dirs in segments(4),
        shared in 0usize..3,
        file in "[a-z]{1,6}\\.txt",
    ) {
        // Give both sides a common prefix of up to `shared` segments.
        let prefix: Vec<String> = (0..shared).map(|i| format!("p{i}")).collect();
        let from = format!(r"{d}\{}", [prefix.clone(), from_dirs].concat().join("\\"));
        let to = format!(r"{d}\{}\{file}", [prefix, to_dirs].concat().join("\\"));

        let rel = get_relative_path(&from, &to);
        let back = get_absolute_path(&rel, &from);
        prop_assert!(are_same_file_paths(&back, &to), "from={} to={} rel={} back={}", from, to, rel, back);
    }
}
