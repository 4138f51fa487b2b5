// Pharo interop tools: one MCP tool per image server endpoint

use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{json_schema_boolean, json_schema_object, json_schema_string, Tool, ToolRegistry};
use anyhow::{Context, Result};
use pharo_interop_sdk::api::{
    InstallProjectRequest, ReadScreenRequest, TonelRequest, DEFAULT_TONEL_PATH,
};
use pharo_interop_sdk::{InteropResponse, PharoClient};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Every operation the image server offers, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Eval,
    GetClassSource,
    GetMethodSource,
    GetClassComment,
    SearchClassesLike,
    SearchMethodsLike,
    SearchTraitsLike,
    SearchImplementors,
    SearchReferences,
    SearchReferencesToClass,
    ListPackages,
    ListClasses,
    ListExtendedClasses,
    ListMethods,
    ExportPackage,
    ImportPackage,
    RunPackageTest,
    RunClassTest,
    InstallProject,
    ReadScreen,
    GetSettings,
    ApplySettings,
}

impl Operation {
    pub const ALL: [Operation; 22] = [
        Operation::Eval,
        Operation::GetClassSource,
        Operation::GetMethodSource,
        Operation::GetClassComment,
        Operation::SearchClassesLike,
        Operation::SearchMethodsLike,
        Operation::SearchTraitsLike,
        Operation::SearchImplementors,
        Operation::SearchReferences,
        Operation::SearchReferencesToClass,
        Operation::ListPackages,
        Operation::ListClasses,
        Operation::ListExtendedClasses,
        Operation::ListMethods,
        Operation::ExportPackage,
        Operation::ImportPackage,
        Operation::RunPackageTest,
        Operation::RunClassTest,
        Operation::InstallProject,
        Operation::ReadScreen,
        Operation::GetSettings,
        Operation::ApplySettings,
    ];

    /// Tool name exposed over MCP.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eval => "eval",
            Self::GetClassSource => "get_class_source",
            Self::GetMethodSource => "get_method_source",
            Self::GetClassComment => "get_class_comment",
            Self::SearchClassesLike => "search_classes_like",
            Self::SearchMethodsLike => "search_methods_like",
            Self::SearchTraitsLike => "search_traits_like",
            Self::SearchImplementors => "search_implementors",
            Self::SearchReferences => "search_references",
            Self::SearchReferencesToClass => "search_references_to_class",
            Self::ListPackages => "list_packages",
            Self::ListClasses => "list_classes",
            Self::ListExtendedClasses => "list_extended_classes",
            Self::ListMethods => "list_methods",
            Self::ExportPackage => "export_package",
            Self::ImportPackage => "import_package",
            Self::RunPackageTest => "run_package_test",
            Self::RunClassTest => "run_class_test",
            Self::InstallProject => "install_project",
            Self::ReadScreen => "read_screen",
            Self::GetSettings => "get_settings",
            Self::ApplySettings => "apply_settings",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Eval => "Evaluate a Pharo Smalltalk expression and return the printed result. \
                Errors raised in the image come back with description, stack_trace and receiver.",
            Self::GetClassSource => "Get the source code of a Smalltalk class.",
            Self::GetMethodSource => "Get the source code of a specific method in a class.",
            Self::GetClassComment => "Get the comment of a Smalltalk class.",
            Self::SearchClassesLike => "Find classes whose name matches a pattern.",
            Self::SearchMethodsLike => "Find methods whose selector matches a pattern.",
            Self::SearchTraitsLike => "Find traits whose name matches a pattern.",
            Self::SearchImplementors => {
                "Get all implementors of a method selector as {class, method, package} entries."
            }
            Self::SearchReferences => {
                "Get all references to a method selector or a symbol as {class, method, package} entries."
            }
            Self::SearchReferencesToClass => {
                "Find references to a class as {package, class, method} entries."
            }
            Self::ListPackages => "Get the list of all packages.",
            Self::ListClasses => "Get the list of classes in a package.",
            Self::ListExtendedClasses => "Get the list of classes a package extends.",
            Self::ListMethods => {
                "Get the list of methods in a package, each as \"ClassName>>#methodName\"."
            }
            Self::ExportPackage => "Export a package in Tonel format.",
            Self::ImportPackage => "Import a Tonel package from the given path.",
            Self::RunPackageTest => "Run the tests of a package and return a results summary.",
            Self::RunClassTest => "Run the tests of a class and return a results summary.",
            Self::InstallProject => "Install a project using Metacello.",
            Self::ReadScreen => {
                "UI screen reader for debugging Pharo interfaces. Returns the UI structure \
                 of World morphs, Spec windows or Roassal visualizations, a human readable \
                 summary, and optionally the path of a PNG screenshot written by the image."
            }
            Self::GetSettings => "Retrieve the current server configuration.",
            Self::ApplySettings => {
                "Modify the server configuration. Unknown keys are stored as custom settings."
            }
        }
    }

    fn input_schema(&self) -> Value {
        let class_name = || json!({ "class_name": json_schema_string("The name of the class") });
        let package_name =
            || json!({ "package_name": json_schema_string("The name of the package") });

        match self {
            Self::Eval => json_schema_object(
                json!({ "code": json_schema_string("The Smalltalk code to evaluate") }),
                vec!["code"],
            ),
            Self::GetClassSource
            | Self::GetClassComment
            | Self::SearchReferencesToClass
            | Self::RunClassTest => json_schema_object(class_name(), vec!["class_name"]),
            Self::GetMethodSource => json_schema_object(
                json!({
                    "class_name": json_schema_string("The name of the class containing the method"),
                    "method_name": json_schema_string("The name of the method to retrieve source for")
                }),
                vec!["class_name", "method_name"],
            ),
            Self::SearchClassesLike => json_schema_object(
                json!({
                    "class_name_query": json_schema_string("The pattern to search for in class names")
                }),
                vec!["class_name_query"],
            ),
            Self::SearchMethodsLike => json_schema_object(
                json!({
                    "method_name_query": json_schema_string("The pattern to search for in method names")
                }),
                vec!["method_name_query"],
            ),
            Self::SearchTraitsLike => json_schema_object(
                json!({
                    "trait_name_query": json_schema_string("The pattern to search for in trait names")
                }),
                vec!["trait_name_query"],
            ),
            Self::SearchImplementors => json_schema_object(
                json!({
                    "method_name": json_schema_string("The method name to find implementors for")
                }),
                vec!["method_name"],
            ),
            Self::SearchReferences => json_schema_object(
                json!({
                    "method_name_or_symbol": json_schema_string("The method name or symbol to find references for")
                }),
                vec!["method_name_or_symbol"],
            ),
            Self::ListClasses
            | Self::ListExtendedClasses
            | Self::ListMethods
            | Self::RunPackageTest => json_schema_object(package_name(), vec!["package_name"]),
            Self::ExportPackage | Self::ImportPackage => json_schema_object(
                json!({
                    "package_name": json_schema_string("The name of the package"),
                    "path": json_schema_string(&format!(
                        "Directory of the Tonel files (default: {})",
                        DEFAULT_TONEL_PATH
                    ))
                }),
                vec!["package_name"],
            ),
            Self::InstallProject => json_schema_object(
                json!({
                    "project_name": json_schema_string("The name of the project to install"),
                    "repository_url": json_schema_string("The repository URL for the project"),
                    "load_groups": json_schema_string("Comma-separated list of groups to load")
                }),
                vec!["project_name", "repository_url"],
            ),
            Self::ReadScreen => json_schema_object(
                json!({
                    "target_type": json_schema_string(
                        "UI type to inspect: 'world' (morphs), 'spec' (windows), or 'roassal' (visualizations) (default: world)"
                    ),
                    "capture_screenshot": json_schema_boolean("Include PNG screenshot in response (default: true)")
                }),
                vec![],
            ),
            Self::ListPackages | Self::GetSettings => json_schema_object(json!({}), vec![]),
            Self::ApplySettings => json_schema_object(
                json!({
                    "settings": {
                        "type": "object",
                        "description": "Settings dictionary to apply to the server"
                    }
                }),
                vec!["settings"],
            ),
        }
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    /// Decode the tool arguments and run the matching client call.
    pub async fn invoke(&self, client: &PharoClient, arguments: Value) -> Result<InteropResponse> {
        let response = match self {
            Self::Eval => {
                let args: CodeArgs = self.args(arguments)?;
                client.code().eval(args.code).await
            }
            Self::GetClassSource => {
                let args: ClassArgs = self.args(arguments)?;
                client.classes().source(args.class_name).await
            }
            Self::GetMethodSource => {
                let args: MethodArgs = self.args(arguments)?;
                client
                    .classes()
                    .method_source(args.class_name, args.method_name)
                    .await
            }
            Self::GetClassComment => {
                let args: ClassArgs = self.args(arguments)?;
                client.classes().comment(args.class_name).await
            }
            Self::SearchClassesLike => {
                let args: ClassQueryArgs = self.args(arguments)?;
                client.search().classes_like(args.class_name_query).await
            }
            Self::SearchMethodsLike => {
                let args: MethodQueryArgs = self.args(arguments)?;
                client.search().methods_like(args.method_name_query).await
            }
            Self::SearchTraitsLike => {
                let args: TraitQueryArgs = self.args(arguments)?;
                client.search().traits_like(args.trait_name_query).await
            }
            Self::SearchImplementors => {
                let args: ImplementorsArgs = self.args(arguments)?;
                client.search().implementors(args.method_name).await
            }
            Self::SearchReferences => {
                let args: ReferencesArgs = self.args(arguments)?;
                client.search().references(args.method_name_or_symbol).await
            }
            Self::SearchReferencesToClass => {
                let args: ClassArgs = self.args(arguments)?;
                client.search().references_to_class(args.class_name).await
            }
            Self::ListPackages => client.packages().list().await,
            Self::ListClasses => {
                let args: PackageArgs = self.args(arguments)?;
                client.packages().classes(args.package_name).await
            }
            Self::ListExtendedClasses => {
                let args: PackageArgs = self.args(arguments)?;
                client.packages().extended_classes(args.package_name).await
            }
            Self::ListMethods => {
                let args: PackageArgs = self.args(arguments)?;
                client.packages().methods(args.package_name).await
            }
            Self::ExportPackage => {
                let request: TonelRequest = self.args(arguments)?;
                client.packages().export(request).await
            }
            Self::ImportPackage => {
                let request: TonelRequest = self.args(arguments)?;
                client.packages().import(request).await
            }
            Self::RunPackageTest => {
                let args: PackageArgs = self.args(arguments)?;
                client.tests().run_package(args.package_name).await
            }
            Self::RunClassTest => {
                let args: ClassArgs = self.args(arguments)?;
                client.tests().run_class(args.class_name).await
            }
            Self::InstallProject => {
                let request: InstallProjectRequest = self.args(arguments)?;
                client.projects().install(request).await
            }
            Self::ReadScreen => {
                let request: ReadScreenRequest = self.args(arguments)?;
                client.screen().read(request).await
            }
            Self::GetSettings => client.settings().get().await,
            Self::ApplySettings => {
                let args: SettingsArgs = self.args(arguments)?;
                client.settings().apply(args.settings).await
            }
        };
        Ok(response)
    }

    fn args<T: DeserializeOwned>(&self, arguments: Value) -> Result<T> {
        serde_json::from_value(arguments)
            .with_context(|| format!("Invalid arguments for {}", self.name()))
    }
}

#[derive(Debug, Deserialize)]
struct CodeArgs {
    code: String,
}

#[derive(Debug, Deserialize)]
struct ClassArgs {
    class_name: String,
}

#[derive(Debug, Deserialize)]
struct MethodArgs {
    class_name: String,
    method_name: String,
}

#[derive(Debug, Deserialize)]
struct PackageArgs {
    package_name: String,
}

#[derive(Debug, Deserialize)]
struct ClassQueryArgs {
    class_name_query: String,
}

#[derive(Debug, Deserialize)]
struct MethodQueryArgs {
    method_name_query: String,
}

#[derive(Debug, Deserialize)]
struct TraitQueryArgs {
    trait_name_query: String,
}

#[derive(Debug, Deserialize)]
struct ImplementorsArgs {
    method_name: String,
}

#[derive(Debug, Deserialize)]
struct ReferencesArgs {
    method_name_or_symbol: String,
}

#[derive(Debug, Deserialize)]
struct SettingsArgs {
    settings: Map<String, Value>,
}

/// MCP tool forwarding to one image server operation
pub struct PharoTool {
    operation: Operation,
    client: PharoClient,
}

impl PharoTool {
    pub fn new(operation: Operation, client: PharoClient) -> Self {
        Self { operation, client }
    }
}

#[async_trait::async_trait]
impl Tool for PharoTool {
    fn schema(&self) -> ToolSchema {
        self.operation.schema()
    }

    async fn execute(&self, arguments: Value) -> Result<CallToolResult> {
        let response = self.operation.invoke(&self.client, arguments).await?;
        if let Some(error) = response.error() {
            tracing::debug!(tool = self.operation.name(), error = %error.summary(), "Image reported failure");
        }

        let structured = response.to_value();
        let text = serde_json::to_string_pretty(&structured)?;
        Ok(CallToolResult {
            content: vec![ToolContent::text(text)],
            structured_content: Some(structured),
            is_error: None,
        })
    }
}

/// Register one tool per operation, all sharing `client`.
pub fn register_interop_tools(registry: &mut ToolRegistry, client: &PharoClient) {
    for operation in Operation::ALL {
        registry.register(Arc::new(PharoTool::new(operation, client.clone())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharo_interop_sdk::{HttpMethod, Transport};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records the last call and answers `{success: true, result: null}`.
    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<(HttpMethod, String, Option<Value>)>>,
    }

    #[async_trait::async_trait]
    impl Transport for RecordingTransport {
        async fn call(&self, method: HttpMethod, path: &str, body: Option<Value>) -> InteropResponse {
            self.calls
                .lock()
                .unwrap()
                .push((method, path.to_string(), body));
            InteropResponse::success(Value::Null)
        }
    }

    fn recording_client() -> (PharoClient, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        (PharoClient::with_transport(transport.clone()), transport)
    }

    #[test]
    fn test_operation_names_are_unique() {
        let names: HashSet<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), Operation::ALL.len());
    }

    #[test]
    fn test_schemas_list_required_properties() {
        for operation in Operation::ALL {
            let schema = operation.schema();
            assert_eq!(schema.input_schema["type"], "object");
            assert!(!schema.description.is_empty());

            let properties = schema.input_schema["properties"].as_object().unwrap();
            for required in schema.input_schema["required"].as_array().unwrap() {
                let required = required.as_str().unwrap();
                assert!(
                    properties.contains_key(required),
                    "{} requires undeclared {}",
                    operation.name(),
                    required
                );
            }
        }
    }

    #[tokio::test]
    async fn test_search_references_renames_argument() {
        let (client, transport) = recording_client();

        Operation::SearchReferences
            .invoke(&client, json!({"method_name_or_symbol": "#printOn:"}))
            .await
            .unwrap();

        let calls = transport.calls.lock().unwrap();
        assert_eq!(
            calls[0],
            (
                HttpMethod::Get,
                "/search-references".to_string(),
                Some(json!({"program_symbol": "#printOn:"}))
            )
        );
    }

    #[tokio::test]
    async fn test_defaults_are_filled_in() {
        let (client, transport) = recording_client();

        Operation::ExportPackage
            .invoke(&client, json!({"package_name": "Sis-Core"}))
            .await
            .unwrap();
        Operation::ReadScreen.invoke(&client, json!({})).await.unwrap();
        Operation::InstallProject
            .invoke(
                &client,
                json!({"project_name": "Foo", "repository_url": "github://foo/bar:main/src"}),
            )
            .await
            .unwrap();

        let calls = transport.calls.lock().unwrap();
        assert_eq!(
            calls[0].2,
            Some(json!({"package_name": "Sis-Core", "path": "/tmp"}))
        );
        assert_eq!(
            calls[1].2,
            Some(json!({"target_type": "world", "capture_screenshot": true}))
        );
        assert_eq!(
            calls[2].2,
            Some(json!({"project_name": "Foo", "repository_url": "github://foo/bar:main/src"}))
        );
    }

    #[tokio::test]
    async fn test_read_screen_target_is_not_checked_locally() {
        let (client, transport) = recording_client();

        Operation::ReadScreen
            .invoke(&client, json!({"target_type": "morphic", "capture_screenshot": false}))
            .await
            .unwrap();

        let calls = transport.calls.lock().unwrap();
        assert_eq!(
            calls[0],
            (
                HttpMethod::Get,
                "/read-screen".to_string(),
                Some(json!({"target_type": "morphic", "capture_screenshot": false}))
            )
        );
    }

    #[tokio::test]
    async fn test_argumentless_operations_ignore_arguments() {
        let (client, transport) = recording_client();

        Operation::ListPackages.invoke(&client, Value::Null).await.unwrap();
        Operation::GetSettings.invoke(&client, json!({"x": 1})).await.unwrap();

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls[0], (HttpMethod::Get, "/list-packages".to_string(), None));
        assert_eq!(calls[1], (HttpMethod::Get, "/get-settings".to_string(), None));
    }

    #[tokio::test]
    async fn test_missing_argument_is_an_error() {
        let (client, transport) = recording_client();

        let err = Operation::GetMethodSource
            .invoke(&client, json!({"class_name": "Object"}))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid arguments for get_method_source"));
        assert!(transport.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tool_result_carries_envelope() {
        let (client, _transport) = recording_client();
        let tool = PharoTool::new(Operation::Eval, client);

        let result = tool.execute(json!({"code": "nil"})).await.unwrap();

        assert_eq!(result.is_error, None);
        assert_eq!(
            result.structured_content,
            Some(json!({"success": true, "result": null}))
        );
        let ToolContent::Text { text } = &result.content[0];
        assert_eq!(
            serde_json::from_str::<Value>(text).unwrap(),
            json!({"success": true, "result": null})
        );
    }

    #[test]
    fn test_register_interop_tools() {
        let (client, _transport) = recording_client();
        let mut registry = ToolRegistry::new();

        register_interop_tools(&mut registry, &client);

        assert_eq!(registry.len(), 22);
        assert!(registry.contains("eval"));
        assert!(registry.contains("apply_settings"));
    }
}
