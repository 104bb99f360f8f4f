use builtins::{ConsoleObject, StackTraceStyle};
use core_types::{ResolveError, ResolvedLocation, StackFrame, Value};
use dbg::acquire::{acquire, RawFrameSource};
use dbg::normalize::{normalize, ReferenceBase};
use dbg::parse::{parse, parse_stack_line};
use dbg::probe::detect;
use dbg::{dbg, dbg_named, resolve_location, CallSiteApi, DbgOptions, EnvironmentKind, Host, Realm};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

fn captured(realm: Realm) -> (Realm, Rc<RefCell<Vec<String>>>) {
    let output = Rc::new(RefCell::new(Vec::new()));
    let realm = realm.with_console(ConsoleObject::new_with_output(output.clone()));
    (realm, output)
}

/// A host that replays a fixed `Error.prototype.stack` string.
struct ScriptedHost {
    globals: Vec<&'static str>,
    stack: Option<String>,
    cwd: Option<PathBuf>,
    lines: RefCell<Vec<String>>,
}

impl ScriptedHost {
    fn server(stack: &str) -> Self {
        ScriptedHost {
            globals: vec!["Deno"],
            stack: Some(stack.to_string()),
            cwd: Some(PathBuf::from("/srv/app")),
            lines: RefCell::new(Vec::new()),
        }
    }

    fn browser(stack: &str) -> Self {
        ScriptedHost {
            globals: vec![],
            stack: Some(stack.to_string()),
            cwd: None,
            lines: RefCell::new(Vec::new()),
        }
    }
}

impl Host for ScriptedHost {
    fn has_global(&self, path: &str) -> bool {
        self.globals.iter().any(|global| *global == path)
    }

    fn get_call_sites(&self, api: CallSiteApi) -> Result<Vec<StackFrame>, ResolveError> {
        Err(ResolveError::HostFailure(format!("{} is not a function", api.global_path())))
    }

    fn capture_error_stack(&self) -> Result<Option<String>, ResolveError> {
        Ok(self.stack.clone())
    }

    fn cwd(&self) -> Option<PathBuf> {
        self.cwd.clone()
    }

    fn warn(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

#[cfg(test)]
mod probe_tests {
    use super::*;

    #[test]
    fn test_bun_with_process_is_still_server() {
        assert_eq!(detect(&Realm::bun()), EnvironmentKind::ServerStackOnly);
    }

    #[test]
    fn test_any_single_marker_means_server() {
        for marker in ["Deno", "Bun", "process"] {
            let realm = Realm::new().with_global(marker);
            assert_eq!(detect(&realm), EnvironmentKind::ServerStackOnly, "marker {}", marker);
        }
    }

    #[test]
    fn test_call_site_api_beats_server_markers() {
        let realm = Realm::deno().with_global("util.getCallSite");
        assert_eq!(
            detect(&realm),
            EnvironmentKind::CallSiteCapable(CallSiteApi::GetCallSite)
        );
    }

    #[test]
    fn test_detection_is_stable() {
        let realm = Realm::node();
        assert_eq!(detect(&realm), detect(&realm));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EnvironmentKind::BrowserLike.to_string(), "browser-like");
        assert_eq!(
            EnvironmentKind::CallSiteCapable(CallSiteApi::GetCallSites).to_string(),
            "call-site (util.getCallSites)"
        );
    }
}

#[cfg(test)]
mod acquire_tests {
    use super::*;

    #[test]
    fn test_no_stack_is_unresolved() {
        let host = ScriptedHost {
            stack: None,
            ..ScriptedHost::server("")
        };

        let err = acquire(&host, EnvironmentKind::ServerStackOnly).unwrap_err();
        assert_eq!(err, ResolveError::UnresolvedFrame { index: 1 });
    }

    #[test]
    fn test_legacy_api_is_used_when_detected() {
        let realm = Realm::legacy_node();
        realm.push_frame(StackFrame::new(Some("main"), Some("/srv/app/main.js"), 2, 9));

        let source = realm.call_native("dbg", |r| acquire(r, detect(r))).unwrap();
        match source {
            RawFrameSource::CallSites(frames) => assert_eq!(frames.len(), 2),
            other => panic!("expected call sites, got {:?}", other),
        }
    }

    #[test]
    fn test_jsc_stack_has_no_header() {
        let realm = Realm::bun();
        realm.push_frame(StackFrame::new(None, Some("/srv/app/main.js"), 2, 9));

        let source = realm.call_native("dbg", |r| acquire(r, detect(r))).unwrap();
        assert_eq!(
            source,
            RawFrameSource::StackText("dbg@[native code]\n/srv/app/main.js:2:9".to_string())
        );
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_v8_named_frame() {
        let location = parse_stack_line("    at main (file:///srv/app/main.ts:30:22)").unwrap();
        assert_eq!(location, ResolvedLocation::new("file:///srv/app/main.ts", 30, 22));
    }

    #[test]
    fn test_v8_async_and_constructor_frames() {
        let location = parse_stack_line("    at async run (/srv/app/a.js:3:4)").unwrap();
        assert_eq!(location, ResolvedLocation::new("/srv/app/a.js", 3, 4));

        let location = parse_stack_line("    at new Widget (/srv/app/w.js:10:1)").unwrap();
        assert_eq!(location, ResolvedLocation::new("/srv/app/w.js", 10, 1));
    }

    #[test]
    fn test_v8_anonymous_frame() {
        let location = parse_stack_line("    at file:///srv/app/main.ts:5:1").unwrap();
        assert_eq!(location, ResolvedLocation::new("file:///srv/app/main.ts", 5, 1));
    }

    #[test]
    fn test_v8_frame_with_port_in_url() {
        let location = parse_stack_line("    at onLoad (http://localhost:8080/app.js:12:7)").unwrap();
        assert_eq!(location, ResolvedLocation::new("http://localhost:8080/app.js", 12, 7));
    }

    #[test]
    fn test_spidermonkey_frame() {
        let location = parse_stack_line("main@https://example.com/app.js:4:11").unwrap();
        assert_eq!(location, ResolvedLocation::new("https://example.com/app.js", 4, 11));
    }

    #[test]
    fn test_spidermonkey_anonymous_frame() {
        let location = parse_stack_line("@https://example.com/app.js:4:11").unwrap();
        assert_eq!(location.file, "https://example.com/app.js");
    }

    #[test]
    fn test_jsc_bare_frame() {
        let location = parse_stack_line("/srv/app/main.js:2:9").unwrap();
        assert_eq!(location, ResolvedLocation::new("/srv/app/main.js", 2, 9));
    }

    #[test]
    fn test_lines_without_coordinates_do_not_match() {
        assert_eq!(parse_stack_line("    at dbg (native)"), None);
        assert_eq!(parse_stack_line("dbg@[native code]"), None);
        assert_eq!(parse_stack_line(""), None);
        assert_eq!(parse_stack_line("    at Array.map (<anonymous>)"), None);
    }

    #[test]
    fn test_short_stack_text_is_unresolved() {
        let source = RawFrameSource::StackText("    at dbg (native)".to_string());
        assert_eq!(parse(&source), Err(ResolveError::UnresolvedFrame { index: 1 }));

        let source = RawFrameSource::StackText(String::new());
        assert_eq!(parse(&source), Err(ResolveError::UnresolvedFrame { index: 1 }));
    }

    #[test]
    fn test_caller_line_is_second_line() {
        let source = RawFrameSource::StackText(
            "    at dbg (native)\n    at caller (/a/b.js:7:3)\n    at outer (/a/c.js:1:1)".to_string(),
        );
        assert_eq!(parse(&source), Ok(ResolvedLocation::new("/a/b.js", 7, 3)));
    }

    #[test]
    fn test_empty_source_url_is_unresolved() {
        let source = RawFrameSource::CallSites(vec![
            StackFrame::native("dbg"),
            StackFrame::new(Some("main"), Some(""), 1, 1),
        ]);
        assert_eq!(parse(&source), Err(ResolveError::UnresolvedFrame { index: 1 }));
    }
}

#[cfg(all(test, unix))]
mod normalize_tests {
    use super::*;

    #[test]
    fn test_call_site_paths_are_relative() {
        let base = ReferenceBase::working_dir("/srv/app");
        let shown = normalize(
            "/srv/app/lib/util.js",
            EnvironmentKind::CallSiteCapable(CallSiteApi::GetCallSites),
            Some(&base),
        );
        assert_eq!(shown, "lib/util.js");
    }

    #[test]
    fn test_browser_ignores_base() {
        let base = ReferenceBase::working_dir("/srv/app");
        let shown = normalize("file:///srv/app/index.js", EnvironmentKind::BrowserLike, Some(&base));
        assert_eq!(shown, "index.js");
    }

    #[test]
    fn test_file_is_the_base_itself() {
        let base = ReferenceBase::working_dir("/srv/app");
        let shown = normalize("/srv/app", EnvironmentKind::ServerStackOnly, Some(&base));
        assert_eq!(shown, ".");
    }

    #[test]
    fn test_tempdir_base() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("src").join("main.ts");
        let url = url::Url::from_file_path(&script).unwrap();

        let base = ReferenceBase::working_dir(dir.path());
        let shown = normalize(url.as_str(), EnvironmentKind::ServerStackOnly, Some(&base));
        assert_eq!(shown, "src/main.ts");
    }

    #[test]
    fn test_module_dir_from_absolute_path() {
        let base = ReferenceBase::module_dir("/srv/app/src/main.ts").unwrap();
        let shown = normalize("/srv/app/src/util.ts", EnvironmentKind::ServerStackOnly, Some(&base));
        assert_eq!(shown, "util.ts");
    }
}

#[cfg(test)]
mod dbg_tests {
    use super::*;

    fn in_script_dir(realm: Realm, dir: &str) -> (Realm, Rc<RefCell<Vec<String>>>) {
        let (realm, output) = captured(realm.with_cwd(Some(PathBuf::from(dir))));
        realm.push_frame(StackFrame::new(
            Some("main"),
            Some(format!("{}/script.ts", dir).as_str()),
            30,
            22,
        ));
        (realm, output)
    }

    #[cfg(unix)]
    #[test]
    fn test_call_from_script_prints_relative_location() {
        let (realm, output) = in_script_dir(Realm::node(), "/home/me/app");

        let value = realm.call_dbg(Value::Smi(4), &DbgOptions::default());

        assert_eq!(value, Value::Smi(4));
        assert_eq!(output.borrow().as_slice(), ["[script.ts:30:22] var = 4"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_named_call() {
        let (realm, output) = in_script_dir(Realm::node(), "/home/me/app");

        realm.call_dbg(Value::Smi(4), &DbgOptions::named("myVar"));

        assert_eq!(output.borrow()[0], "[script.ts:30:22] myVar = 4");
    }

    #[cfg(unix)]
    #[test]
    fn test_every_server_preset_agrees() {
        for realm in [Realm::node(), Realm::legacy_node(), Realm::deno(), Realm::bun()] {
            let (realm, output) = in_script_dir(realm, "/home/me/app");
            realm.call_dbg(Value::Smi(4), &DbgOptions::default());
            assert_eq!(output.borrow()[0], "[script.ts:30:22] var = 4");
        }
    }

    #[test]
    fn test_value_is_returned_unchanged() {
        let (realm, _output) = captured(Realm::node());
        let object = Value::Object(vec![
            ("a".to_string(), Value::Smi(1)),
            ("b".to_string(), Value::Array(vec![Value::Null])),
        ]);

        assert_eq!(realm.call_dbg(object.clone(), &DbgOptions::default()), object);
        assert_eq!(realm.call_dbg("text".to_string(), &DbgOptions::default()), "text");
        assert_eq!(realm.call_dbg(Some(3_i32), &DbgOptions::default()), Some(3));
    }

    #[test]
    fn test_nested_calls_return_values_for_outer_expression() {
        let (realm, output) = captured(Realm::node());
        realm.push_frame(StackFrame::new(Some("main"), Some("/x/main.js"), 1, 1));

        let inner = realm.call_dbg(2_i32, &DbgOptions::named("inner"));
        let outer = realm.call_dbg(inner * 2, &DbgOptions::named("outer"));

        assert_eq!(outer, 4);
        assert_eq!(output.borrow().len(), 2);
        assert!(output.borrow()[0].ends_with("inner = 2"));
        assert!(output.borrow()[1].ends_with("outer = 4"));
    }

    #[cfg(unix)]
    #[test]
    fn test_direct_call_reports_innermost_script_frame() {
        let (realm, output) = captured(Realm::node().with_cwd(Some(PathBuf::from("/srv"))));
        realm.push_frame(StackFrame::new(Some("outer"), Some("/srv/outer.js"), 1, 1));
        realm.push_frame(StackFrame::new(Some("inner"), Some("/srv/inner.js"), 5, 3));

        dbg(&realm, Value::Smi(4), &DbgOptions::default());
        realm.call_dbg(Value::Smi(4), &DbgOptions::default());

        assert_eq!(
            output.borrow().as_slice(),
            ["[inner.js:5:3] var = 4", "[inner.js:5:3] var = 4"]
        );
    }

    #[test]
    fn test_direct_call_on_stack_text_host() {
        let (realm, output) = captured(Realm::bun().with_cwd(None));
        realm.push_frame(StackFrame::new(Some("outer"), Some("https://x/outer.js"), 1, 1));
        realm.push_frame(StackFrame::new(Some("inner"), Some("https://x/inner.js"), 5, 3));

        dbg(&realm, Value::Smi(4), &DbgOptions::default());

        assert_eq!(output.borrow()[0], "[https://x/inner.js:5:3] var = 4");
    }

    #[test]
    fn test_top_level_call_without_script_frame_degrades() {
        let (realm, output) = captured(Realm::deno());

        realm.call_dbg(Value::Smi(4), &DbgOptions::named("x"));

        assert_eq!(output.borrow()[0], "x = 4");
    }

    #[test]
    fn test_unknown_stack_layout_degrades() {
        let host = ScriptedHost::server("Error\n    at dbg (native)\n    ~~ something new ~~");

        let value = dbg(&host, Value::Smi(4), &DbgOptions::default());

        assert_eq!(value, Value::Smi(4));
        assert_eq!(host.lines.borrow().as_slice(), ["var = 4"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scripted_v8_stack_resolves() {
        let host = ScriptedHost::server(
            "Error\n    at dbg (native)\n    at main (file:///srv/app/src/main.ts:3:19)",
        );

        dbg_named(&host, "hi", "greeting");

        assert_eq!(host.lines.borrow()[0], "[src/main.ts:3:19] greeting = 'hi'");
    }

    #[test]
    fn test_scripted_browser_stack_uses_file_name() {
        let host = ScriptedHost::browser(
            "dbg@[native code]\nhandler@http://localhost:8000/js/app.js?v=3:40:2",
        );

        dbg(&host, true, &DbgOptions::default());

        assert_eq!(host.lines.borrow()[0], "[app.js:40:2] var = true");
    }

    #[test]
    fn test_partial_call_site_prints_file_only() {
        let (realm, output) = captured(Realm::node().with_cwd(None));
        realm.push_frame(StackFrame {
            function_name: None,
            source_url: Some("node:internal/main".to_string()),
            line: None,
            column: None,
        });

        realm.call_dbg(Value::Null, &DbgOptions::default());

        assert_eq!(output.borrow()[0], "[node:internal/main] var = null");
    }

    #[test]
    fn test_failing_call_site_api_writes_error_line() {
        let host = ScriptedHost {
            globals: vec!["util.getCallSites"],
            ..ScriptedHost::server("")
        };

        let value = dbg(&host, Value::Smi(1), &DbgOptions::named("n"));

        assert_eq!(value, Value::Smi(1));
        assert_eq!(host.lines.borrow().as_slice(), ["[dbg error] n = 1"]);
    }

    #[test]
    fn test_resolve_location_reports_none_when_absorbed() {
        let realm = Realm::node();
        assert_eq!(resolve_location(&realm), Ok(None));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolved_location_round_trips_through_display() {
        let realm = Realm::node().with_cwd(Some(PathBuf::from("/srv")));
        realm.push_frame(StackFrame::new(Some("f"), Some("/srv/a/b.js"), 12, 5));

        let location = realm
            .call_native("dbg", |r| resolve_location(r))
            .unwrap()
            .unwrap();
        let parsed: ResolvedLocation = location.to_string().parse().unwrap();

        assert_eq!(parsed, location);
        assert_eq!(location.to_string(), "a/b.js:12:5");
    }

    #[test]
    fn test_stack_style_matches_engine() {
        assert_eq!(Realm::bun().stack_style(), StackTraceStyle::JavaScriptCore);
        assert_eq!(Realm::deno().stack_style(), StackTraceStyle::V8);
    }
}
