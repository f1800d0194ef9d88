#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde_json::{json, Value};
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use vizspec_common::error::{Result, VizSpecError};
    use vizspec_core::runtime::{CompileOpts, VizCompilerTrait};
    use vizspec_core::scenegraph::{SceneMarkType, TraversalOrder};
    use vizspec_core::spec::chart::VizSpec;
    use vizspec_core::spec::mark::MarkType;
    use vizspec_runtime::{EngineRuntime, RuntimeConfig, ScriptEngine, ScriptSource};

    const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[derive(Default, Clone)]
    struct FakeEngine {
        calls: Arc<Mutex<Vec<String>>>,
        reject_load: bool,
        fail_calls: bool,
    }

    impl FakeEngine {
        fn record(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }
    }

    impl ScriptEngine for FakeEngine {
        fn load(&mut self, name: &str, source: &str) -> Result<()> {
            if self.reject_load {
                return Err(VizSpecError::external(format!(
                    "SyntaxError in {name}: unexpected end of input"
                )));
            }
            assert!(!source.is_empty());
            self.record(format!("load:{name}"));
            Ok(())
        }

        fn call(&mut self, function: &str, args: Vec<Value>) -> Result<Value> {
            let spec_name = args
                .first()
                .and_then(|spec| spec.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            self.record(format!("{function}:{spec_name}"));
            if self.fail_calls {
                return Err(VizSpecError::internal("ReferenceError: vega is not defined"));
            }

            match function {
                "compile" => {
                    let normalize = args[1]["normalize"].as_bool().unwrap_or(false);
                    let mut output = json!({
                        "spec": {"$schema": "https://vega.github.io/schema/vega/v5.json", "marks": []},
                        "warnings": ["Dropping channel size"],
                    });
                    if normalize {
                        output["normalized"] = args[0].clone();
                    }
                    Ok(output)
                }
                "toSvg" => Ok(json!("<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>")),
                "toPng" => {
                    assert_eq!(args[2], json!(2.0));
                    Ok(json!(format!(
                        "data:image/png;base64,{}",
                        STANDARD.encode(PNG_BYTES)
                    )))
                }
                "scenegraph" => Ok(json!({
                    "marktype": "group",
                    "role": "frame",
                    "items": [{
                        "width": 100,
                        "height": 50,
                        "items": [{
                            "marktype": "rect",
                            "role": "mark",
                            "items": [{"x": 0, "y": 10, "width": 10, "height": 40}]
                        }]
                    }]
                })),
                other => Err(VizSpecError::engine(format!("Unknown function {other}"))),
            }
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn inline_config() -> RuntimeConfig {
        RuntimeConfig::new(ScriptSource::inline("bundle.js", "globalThis.vizspec = {}"))
    }

    fn named_spec(name: &str) -> VizSpec {
        let mut spec = VizSpec::with_mark(MarkType::Bar);
        spec.name = Some(name.to_string());
        spec
    }

    #[tokio::test]
    async fn test_compile() {
        init_logger();
        let engine = FakeEngine::default();
        let runtime = EngineRuntime::try_new(engine.clone(), inline_config()).unwrap();

        let output = runtime
            .compile(&named_spec("bars"), &CompileOpts::default())
            .await
            .unwrap();
        assert_eq!(output.spec["marks"], json!([]));
        assert_eq!(output.warnings, vec!["Dropping channel size".to_string()]);
        assert_eq!(output.normalized, None);

        let vega = runtime
            .compile_vega(&named_spec("bars"), &CompileOpts::default())
            .await
            .unwrap();
        assert_eq!(vega, output.spec);
    }

    #[tokio::test]
    async fn test_normalize_echoes_spec() {
        let runtime = EngineRuntime::try_new(FakeEngine::default(), inline_config()).unwrap();
        let spec = named_spec("echo");
        let normalized = runtime
            .normalize(&spec, &CompileOpts::default())
            .await
            .unwrap();
        assert_eq!(normalized, spec);
    }

    #[tokio::test]
    async fn test_to_svg() {
        let runtime = EngineRuntime::try_new(FakeEngine::default(), inline_config()).unwrap();
        let svg = runtime
            .to_svg(&named_spec("svg"), &CompileOpts::default())
            .await
            .unwrap();
        assert!(svg.starts_with("<svg"));
    }

    #[tokio::test]
    async fn test_to_png_decodes_data_url() {
        let runtime = EngineRuntime::try_new(FakeEngine::default(), inline_config()).unwrap();
        let png = runtime
            .to_png(&named_spec("png"), &CompileOpts::default(), 2.0)
            .await
            .unwrap();
        assert_eq!(png, PNG_BYTES.to_vec());
    }

    #[tokio::test]
    async fn test_scenegraph() {
        let runtime = EngineRuntime::try_new(FakeEngine::default(), inline_config()).unwrap();
        let root = runtime
            .scenegraph(&named_spec("scene"), &CompileOpts::default())
            .await
            .unwrap();

        assert_eq!(root.mark_type(), SceneMarkType::Group);
        let nodes = root.flatten(TraversalOrder::DepthFirst);
        assert_eq!(nodes.len(), 2);
        let (path, rect) = &nodes[1];
        assert_eq!(path, &vec![0]);
        assert_eq!(rect.mark_type(), SceneMarkType::Rect);
        assert_eq!(rect.item_commons()[0].height, Some(40.0));
    }

    #[tokio::test]
    async fn test_calls_execute_in_arrival_order() {
        let engine = FakeEngine::default();
        let runtime = EngineRuntime::try_new(engine.clone(), inline_config()).unwrap();
        let opts = CompileOpts::default();
        let (first, second, third) = (named_spec("a"), named_spec("b"), named_spec("c"));

        let (a, b, c) = tokio::join!(
            runtime.compile(&first, &opts),
            runtime.to_svg(&second, &opts),
            runtime.compile(&third, &opts),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        assert_eq!(
            *engine.calls.lock().unwrap(),
            vec![
                "load:bundle.js".to_string(),
                "compile:a".to_string(),
                "toSvg:b".to_string(),
                "compile:c".to_string(),
            ]
        );
    }

    #[test]
    fn test_script_loaded_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "function compile() {{}}").unwrap();
        let engine = FakeEngine::default();
        let config = RuntimeConfig::new(ScriptSource::Path(file.path().to_path_buf()));

        EngineRuntime::try_new(engine.clone(), config).unwrap();
        assert_eq!(
            *engine.calls.lock().unwrap(),
            vec![format!("load:{}", file.path().display())]
        );
    }

    #[test]
    fn test_missing_script_is_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::default();
        let config = RuntimeConfig::new(ScriptSource::Path(dir.path().join("missing.js")));

        let result = EngineRuntime::try_new(engine.clone(), config);
        assert!(matches!(result, Err(VizSpecError::ResourceLoadError(..))));
        assert!(engine.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rejected_script_is_resource_error() {
        let engine = FakeEngine {
            reject_load: true,
            ..Default::default()
        };
        let result = EngineRuntime::try_new(engine, inline_config());
        match result {
            Err(VizSpecError::ResourceLoadError(message, _)) => {
                assert!(message.contains("bundle.js"));
                assert!(message.contains("SyntaxError"));
            }
            Err(other) => panic!("Unexpected error: {other}"),
            Ok(_) => panic!("Expected script load to fail"),
        }
    }

    #[tokio::test]
    async fn test_call_failure_is_engine_error() {
        let engine = FakeEngine {
            fail_calls: true,
            ..Default::default()
        };
        let runtime = EngineRuntime::try_new(engine, inline_config()).unwrap();
        let result = runtime
            .to_svg(&named_spec("broken"), &CompileOpts::default())
            .await;

        match result {
            Err(err @ VizSpecError::EngineError(..)) => {
                assert!(err.to_string().contains("ReferenceError"));
                assert!(err.to_string().contains("toSvg"));
            }
            Err(other) => panic!("Unexpected error: {other}"),
            Ok(_) => panic!("Expected engine call to fail"),
        }
    }

    #[test]
    fn test_blocking_api() {
        let runtime = EngineRuntime::try_new(FakeEngine::default(), inline_config()).unwrap();
        let opts = CompileOpts::default();
        let spec = named_spec("blocking");

        let output = runtime.compile_blocking(&spec, &opts).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(runtime.to_png_blocking(&spec, &opts, 2.0).unwrap(), PNG_BYTES);
        assert_eq!(
            runtime.scenegraph_blocking(&spec, &opts).unwrap().len(),
            1
        );
    }
}
