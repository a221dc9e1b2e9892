#[cfg(test)]
mod diagnostic_tests {
    use parsley_errors as perr;

    use perr::{data, Diagnostic, ErrorClass};

    #[test]
    fn type_names_are_lowercased() {
        let d = Diagnostic::render(
            "TYPE-0001",
            data! { "Function": "len", "Expected": "STRING", "Got": "INTEGER" },
        );

        assert_eq!(d.message(), "len expected STRING, got integer");
        assert!(d.message().contains("got integer"));
        assert_eq!(d.data()["Got"], "integer");
    }

    #[test]
    fn operator_types_are_lowercased() {
        let d = Diagnostic::render(
            "OP-0001",
            data! { "LeftType": "STRING", "Operator": "-", "RightType": "BOOLEAN" },
        );
        assert_eq!(d.message(), "Unknown operator: string - boolean");
        assert_eq!(d.class(), ErrorClass::Operator);
    }

    #[test]
    fn partial_data_renders_supplied_keys() {
        let d = Diagnostic::render(
            "TYPE-0001",
            data! { "Function": "len", "Got": "INTEGER" },
        );
        assert_eq!(d.message(), "len expected <no value>, got integer");

        let d = Diagnostic::render("PARSE-0008", data! {});
        assert_eq!(d.message(), "Singleton tag must be self-closing");
        assert_eq!(d.hints(), ["<<no value>/>"]);
        assert!(!d.hints()[0].contains("{{"));
    }

    #[test]
    fn host_error_text_travels_under_cause() {
        let d = Diagnostic::render(
            "IO-0003",
            data! { "Path": "notes.txt", "Cause": "permission denied" },
        );
        assert_eq!(
            d.message(),
            "Failed to read file 'notes.txt': permission denied"
        );

        let v: serde_json::Value = serde_json::from_str(&d.to_json().unwrap()).unwrap();
        assert_eq!(v["data"]["Cause"], "permission denied");
    }

    #[test]
    fn unknown_code_falls_back() {
        let d = Diagnostic::render("NO-SUCH-CODE", data! { "message": "custom text" });
        assert_eq!(d.class(), ErrorClass::Type);
        assert_eq!(d.message(), "custom text");
        assert_eq!(d.code(), "NO-SUCH-CODE");
        assert!(d.hints().is_empty());

        let d = Diagnostic::render("NO-SUCH-CODE", data! {});
        assert_eq!(d.message(), "NO-SUCH-CODE");

        let d = Diagnostic::render("NO-SUCH-CODE", data! { "message": 7 });
        assert_eq!(d.message(), "NO-SUCH-CODE");
    }

    #[test]
    fn hints_render_in_order() {
        let d = Diagnostic::render("PARSE-0003", data! { "Var": "x", "Array": "items" });
        assert_eq!(
            d.hints(),
            ["for x in items { ... }", "for (items) fn(x) { ... }"]
        );
        assert!(d.is_parse_error());
        assert!(!d.is_runtime_error());
    }

    #[test]
    fn conditional_hint_picks_branch() {
        let d = Diagnostic::render("UNDEF-0010", data! {});
        assert_eq!(d.hints(), ["Read @params inside a handler function"]);

        let d = Diagnostic::render("UNDEF-0010", data! { "Handler": "get" });
        assert_eq!(d.hints(), ["Read @params inside get instead"]);

        let d = Diagnostic::render("UNDEF-0006", data! { "Name": "x" });
        assert!(d.hints().is_empty());
    }

    #[test]
    fn render_at_attaches_position() {
        let d = Diagnostic::render_at("OP-0002", 3, 14, data! {});
        assert_eq!((d.line(), d.column()), (3, 14));
        assert_eq!(d, Diagnostic::render("OP-0002", data! {}).with_position(3, 14));
    }

    #[test]
    fn with_file_leaves_original_untouched() {
        let a = Diagnostic::simple(ErrorClass::Io, "x");
        let b = a.with_file("f.pars");

        assert_eq!(a.file(), None);
        assert_eq!(b.file(), Some("f.pars"));
        assert_eq!(b.message(), "x");
        assert_eq!(b.class(), ErrorClass::Io);
    }

    #[test]
    fn with_position_leaves_original_untouched() {
        let a = Diagnostic::simple(ErrorClass::Value, "negative");
        let b = a.with_position(2, 5);

        assert_eq!((a.line(), a.column()), (0, 0));
        assert_eq!((b.line(), b.column()), (2, 5));
        assert_eq!(b.with_file("").file(), None);
    }

    #[test]
    fn single_line_form() {
        let d = Diagnostic::simple(ErrorClass::Type, "something went wrong");
        assert_eq!(d.to_single_line(), "something went wrong");

        let d = Diagnostic::simple(ErrorClass::Parse, "parse error")
            .with_position(3, 1)
            .with_file("test.pars");
        assert_eq!(d.to_single_line(), "test.pars: line 3, column 1: parse error");

        let d = Diagnostic::simple_with_hints(
            ErrorClass::Parse,
            "ambiguous syntax",
            ["for (array) fn", "for x in array { ... }"],
        );
        assert_eq!(
            d.to_string(),
            "ambiguous syntax\n  for (array) fn\n  for x in array { ... }"
        );
    }

    #[test]
    fn pretty_form_headers_and_hints() {
        let d = Diagnostic::simple(ErrorClass::Parse, "unexpected token").with_position(5, 10);
        assert_eq!(d.to_pretty(), "Parser error: line 5, column 10\n  unexpected token");

        let d = Diagnostic::simple(ErrorClass::Type, "type mismatch");
        assert_eq!(d.to_pretty(), "Runtime error:\n  type mismatch");

        let d = Diagnostic::simple_with_hints(
            ErrorClass::Parse,
            "syntax error",
            ["for x in array { ... }", "for (array) fn"],
        )
        .with_position(10, 5)
        .with_file("handlers/index.pars");
        assert_eq!(
            d.to_pretty(),
            "Parser error:\n  in: handlers/index.pars\n  at: line 10, column 5\n  syntax error\n  Use: for x in array { ... }\n   or: for (array) fn"
        );

        let d = Diagnostic::simple(ErrorClass::Io, "gone").with_file("a.pars");
        assert_eq!(d.to_pretty(), "Runtime error:\n  in: a.pars\n  gone");
    }

    #[test]
    fn json_omits_empty_fields() {
        let d = Diagnostic::simple(ErrorClass::Io, "disk full");
        let v: serde_json::Value = serde_json::from_str(&d.to_json().unwrap()).unwrap();
        let obj = v.as_object().unwrap();

        assert_eq!(obj["class"], "io");
        assert_eq!(obj["code"], "");
        assert_eq!(obj["message"], "disk full");
        assert_eq!(obj["line"], 0);
        assert_eq!(obj["column"], 0);
        assert!(!obj.contains_key("hints"));
        assert!(!obj.contains_key("file"));
        assert!(!obj.contains_key("data"));
    }

    #[test]
    fn json_includes_populated_fields() {
        let d = Diagnostic::render_at("SEC-0002", 4, 2, data! { "Operation": "read" })
            .with_file("main.pars");
        let v: serde_json::Value = serde_json::from_str(&d.to_json_indent().unwrap()).unwrap();

        assert_eq!(v["class"], "security");
        assert_eq!(v["code"], "SEC-0002");
        assert_eq!(v["hints"][0], "use --allow-read or -r to allow file reading");
        assert_eq!(v["file"], "main.pars");
        assert_eq!(v["data"]["Operation"], "read");
        assert_eq!(v["line"], 4);
    }

    #[test]
    fn json_indent_uses_two_spaces() {
        let d = Diagnostic::simple(ErrorClass::State, "closed");
        let text = d.to_json_indent().unwrap();
        assert!(text.starts_with("{\n  \"class\": \"state\""));
    }

    #[test]
    fn import_wrapping_embeds_message() {
        let inner = Diagnostic::render("OP-0002", data! {});
        let outer = Diagnostic::in_module("./lib/math.pars", &inner);
        assert_eq!(outer.code(), "IMPORT-0001");
        assert_eq!(outer.class(), ErrorClass::Import);
        assert_eq!(outer.message(), "In module ./lib/math.pars: Division by zero");

        let inner = inner.with_position(7, 3);
        let outer = Diagnostic::in_module("./lib/math.pars", &inner);
        assert_eq!(outer.code(), "IMPORT-0005");
        assert_eq!(
            outer.message(),
            "In module ./lib/math.pars: line 7, column 3: Division by zero"
        );
        assert_eq!(outer.line(), 0);
    }

    #[test]
    fn usable_as_std_error() {
        fn fails() -> Result<(), Box<dyn std::error::Error>> {
            Err(Diagnostic::simple(ErrorClass::Network, "timeout").into())
        }
        assert_eq!(fails().unwrap_err().to_string(), "timeout");
    }
}
