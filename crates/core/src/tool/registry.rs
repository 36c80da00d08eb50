use std::sync::Arc;

use serde_json::Value;
use tool_choice_model::{ModelTool, ToolCallRequest};

use crate::Tool;
use crate::tool::object::{ToolObject, ToolObjectImpl};
use crate::tool::{Error as ToolError, ToolResult};

/// Maps tool names to executors and runs the calls the model requests.
///
/// The registry never guesses: a call to a name it does not know fails
/// with [`crate::Error::UnknownTool`].
#[derive(Clone, Default)]
pub struct Registry {
    tools: Vec<Arc<dyn ToolObject>>,
}

impl Registry {
    /// Registers a tool.
    ///
    /// Returns the definition generated for the tool. Fails if a tool with
    /// the same name exists, or if the tool's input type cannot be
    /// described as a parameter schema.
    pub fn add_tool<T: Tool>(
        &mut self,
        tool: T,
    ) -> Result<ModelTool, crate::Error> {
        if self.contains(tool.name()) {
            return Err(crate::Error::configuration(format!(
                "tool `{}` is registered more than once",
                tool.name()
            )));
        }
        let object = ToolObjectImpl::new(tool)?;
        let definition = object.definition().clone();
        self.tools.push(Arc::new(object));
        Ok(definition)
    }

    /// Returns `true` if an executor named `name` is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the definitions of all tools, in registration order.
    #[inline]
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.tools
            .iter()
            .map(|tool| tool.definition().clone())
            .collect()
    }

    /// Runs the tool requested by `call`.
    ///
    /// Lookup and required-parameter checks happen immediately, the
    /// returned future only runs the tool and does not borrow the
    /// registry.
    pub fn execute(
        &self,
        call: &ToolCallRequest,
    ) -> impl Future<Output = Result<Value, crate::Error>> + Send + 'static
    {
        let span = debug_span!("tool registry", tool = %call.name);
        let prepared = {
            let _enter = span.enter();
            self.prepare(call)
        };
        async move {
            let fut = prepared?;
            Ok(fut.await?)
        }
    }

    fn prepare(
        &self,
        call: &ToolCallRequest,
    ) -> Result<
        std::pin::Pin<Box<dyn Future<Output = ToolResult> + Send>>,
        crate::Error,
    > {
        let Some(tool) = self.get(&call.name) else {
            warn!("tool not found: {}", call.name);
            return Err(crate::Error::UnknownTool(call.name.clone()));
        };

        let missing = tool
            .definition()
            .input_schema
            .missing_required(&call.arguments);
        if !missing.is_empty() {
            let reason =
                format!("missing required parameters: {}", missing.join(", "));
            return Err(ToolError::invalid_input().with_reason(reason).into());
        }

        let id = &call.id;
        let arguments = &call.arguments;
        trace!("running a tool ({id}) with args: {arguments:?}");
        Ok(Arc::clone(tool).execute(call.arguments.clone()))
    }

    #[inline]
    fn get(&self, name: &str) -> Option<&Arc<dyn ToolObject>> {
        self.tools
            .iter()
            .find(|tool| tool.definition().name == name)
    }
}
