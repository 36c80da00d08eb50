use std::pin::Pin;
use std::sync::Arc;

use schemars::schema_for;
use serde_json::{Map, Value};
use tool_choice_model::{InputSchema, ModelTool};
use tracing::Instrument;

use super::{Error, Tool, ToolResult};

pub(crate) trait ToolObject: Send + Sync + 'static {
    fn definition(&self) -> &ModelTool;

    fn execute(
        self: Arc<Self>,
        arguments: Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>>;
}

pub(crate) struct ToolObjectImpl<T: Tool> {
    tool: T,
    definition: ModelTool,
}

impl<T: Tool> ToolObjectImpl<T> {
    /// Wraps the tool, deriving its definition from `T::Input`.
    pub fn new(tool: T) -> Result<Self, crate::Error> {
        let schema = schema_for!(T::Input).to_value();
        let input_schema = InputSchema::from_value(schema).map_err(|err| {
            crate::Error::configuration(format!(
                "tool `{}` has an unsupported input type: {err}",
                tool.name()
            ))
        })?;
        let definition = ModelTool {
            name: tool.name().to_owned(),
            description: tool.description().trim().to_owned(),
            input_schema,
        };
        Ok(Self { tool, definition })
    }
}

impl<T: Tool> ToolObject for ToolObjectImpl<T> {
    #[inline]
    fn definition(&self) -> &ModelTool {
        &self.definition
    }

    #[inline]
    fn execute(
        self: Arc<Self>,
        arguments: Map<String, Value>,
    ) -> Pin<Box<dyn Future<Output = ToolResult> + Send>> {
        let input: T::Input =
            match serde_json::from_value(Value::Object(arguments)) {
                Ok(input) => input,
                Err(err) => {
                    let reason = format!("{err}");
                    return Box::pin(std::future::ready(ToolResult::Err(
                        Error::invalid_input().with_reason(reason),
                    )));
                }
            };

        Box::pin(
            self.tool
                .execute(input)
                .instrument(debug_span!("tool execute")),
        )
    }
}
