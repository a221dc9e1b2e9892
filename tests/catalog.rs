#[cfg(test)]
mod catalog_tests {
    use parsley_errors as perr;

    use perr::catalog;
    use perr::template;
    use perr::{Data, Diagnostic, ErrorClass, Value};

    /// A bag holding every key referenced by the code's templates.
    fn full_bag(code: &str) -> Data {
        let def = catalog::lookup(code).unwrap();
        let mut bag = Data::new();

        for tmpl in std::iter::once(&def.template).chain(def.hints.iter()) {
            for key in template::placeholders(tmpl) {
                bag.insert(key.to_string(), Value::from("x"));
            }
        }

        bag
    }

    #[test]
    fn every_code_renders_without_leftover_placeholders() {
        for code in catalog::codes() {
            let d = Diagnostic::render(code, full_bag(code));

            assert!(!d.message().contains("{{"), "{} leaked: {}", code, d.message());
            for hint in d.hints() {
                assert!(!hint.contains("{{"), "{} hint leaked: {}", code, hint);
            }
            assert_eq!(d.code(), code);
            assert_eq!(d.class(), catalog::lookup(code).unwrap().class);
        }
    }

    #[test]
    fn every_template_is_well_formed() {
        for (code, def) in catalog::entries() {
            let bag = full_bag(code);
            assert!(template::render(def.template, &bag).is_ok(), "{}", code);
            for hint in def.hints {
                assert!(template::render(hint, &bag).is_ok(), "{} hint", code);
            }
        }
    }

    #[test]
    fn every_class_has_a_code() {
        for class in ErrorClass::ALL {
            assert!(
                catalog::entries().iter().any(|(_, def)| def.class == class),
                "no code for {}",
                class
            );
        }
    }

    #[test]
    fn codes_are_sorted_and_unique() {
        let codes = catalog::codes();
        let mut sorted = codes.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn full_catalog_is_present() {
        assert_eq!(catalog::codes().len(), 218);

        for code in [
            "CMD-0002",
            "FILEOP-0001",
            "COMP-0001",
            "TODICT-0001",
            "SQL-0001",
            "SPREAD-0001",
            "DEST-0001",
            "SFTP-0006",
            "CALL-0003",
        ] {
            assert!(catalog::contains(code), "{} missing", code);
        }
    }

    #[test]
    fn mixed_families_are_filed_by_class() {
        let expect = [
            ("STATE-0012", ErrorClass::State, "Command handle missing {{.Field}} field"),
            ("STATE-0014", ErrorClass::State, "File handle has no valid path"),
            ("STATE-0018", ErrorClass::State, "Request handle has no valid URL"),
            ("IO-0014", ErrorClass::Io, "Cannot read from {{.Stream}}"),
            ("IO-0015", ErrorClass::Io, "Failed to encode data: {{.Cause}}"),
            ("NET-0011", ErrorClass::Network, "Failed to create request: {{.Cause}}"),
            ("FMT-0015", ErrorClass::Format, "Invalid file pattern '{{.Pattern}}': {{.Cause}}"),
            ("VALUE-0010", ErrorClass::Value, "Invalid duration: {{.Cause}}"),
            ("VALUE-0021", ErrorClass::Value, "{{.Function}}() requires {{.Expected}}, got {{.Got}}"),
            ("TYPE-0026", ErrorClass::Type, "{{.Format}} format requires {{.Expected}} at index {{.Index}}, got {{.Got}}"),
        ];

        for (code, class, template) in expect {
            let def = catalog::lookup(code).unwrap();
            assert_eq!(def.class, class, "{}", code);
            assert_eq!(def.template, template, "{}", code);
        }

        assert!(!catalog::contains("CMD-0001"));
        assert!(!catalog::contains("HTTP-0001"));
        assert!(!catalog::contains("VAL-0021"));
    }

    #[test]
    fn component_not_found_has_three_hints() {
        let d = Diagnostic::render("COMP-0001", perr::data! { "Name": "Card" });
        assert_eq!(
            d.message(),
            "Component '<Card/>' not found - 'Card' is null or not exported"
        );
        assert_eq!(d.hints().len(), 3);
        assert_eq!(
            d.hints()[0],
            "Did you forget to 'export Card' in the imported module?"
        );
    }

    #[test]
    fn split_code_rejects_malformed() {
        assert_eq!(catalog::split_code("TYPE-0001"), Some(("TYPE", 1)));
        assert_eq!(catalog::split_code("CALLBACK-0001"), Some(("CALLBACK", 1)));
        assert_eq!(catalog::split_code("TYPE-1"), None);
        assert_eq!(catalog::split_code("TYPE0001"), None);
        assert_eq!(catalog::split_code("-0001"), None);
        assert_eq!(catalog::split_code("NO-SUCH-CODE"), None);
    }
}
