use std::fmt::{self, Display};

use chrono::{Local, NaiveDate};
use tool_choice_core::{Assistant, AssistantBuilder, Conversation, Error};
use tool_choice_model::{ModelProvider, ToolChoice};

use crate::tools::{
    CalculatorTool, CustomerInfoTool, SendTextTool, SentimentScoresTool,
    WebSearchTool,
};

const SUPPORT_BOT_PROMPT: &str = "\
All your communication with a user is done via text message. \
Only call tools when you have enough information to accurately call them. \
Do not call the get_customer_info tool until a user has provided you with \
their username. This is important. \
If you do not know a user's username, simply ask a user for their username.";

/// One of the demo setups, each exercising a different tool choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// A research assistant that may search the web when it has to.
    Auto,
    /// A sentiment analyzer that must report its scores through a tool.
    Forced,
    /// An SMS support bot that must answer through one of its tools.
    Any,
}

impl Scenario {
    /// All scenarios, in presentation order.
    pub const ALL: [Scenario; 3] =
        [Scenario::Auto, Scenario::Forced, Scenario::Any];

    /// Looks a scenario up by its command-line name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(name))
    }

    /// Returns the command-line name of the scenario.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Auto => "auto",
            Scenario::Forced => "forced",
            Scenario::Any => "any",
        }
    }

    /// Returns the message sent when the user gives none.
    pub fn default_message(&self) -> &'static str {
        match self {
            Scenario::Auto => "Who won the 2024 Miami Grand Prix?",
            Scenario::Forced => {
                "I'm a HUGE hater of pickles. I actually despise pickles. \
                 They are garbage."
            }
            Scenario::Any => {
                "I need help looking up an order. My username is jenny76"
            }
        }
    }

    /// Returns the tool choice the scenario's assistant uses.
    pub fn tool_choice(&self) -> ToolChoice {
        match self {
            Scenario::Auto => ToolChoice::Auto,
            Scenario::Forced => ToolChoice::forced("print_sentiment_scores"),
            Scenario::Any => ToolChoice::Any,
        }
    }

    /// Wraps the user's message into the conversation for this scenario.
    pub fn conversation(&self, message: &str) -> Conversation {
        match self {
            Scenario::Forced => Conversation::new().with_user(format!(
                "Analyze the sentiment in the following tweet: \
                 <tweet>{message}</tweet>"
            )),
            Scenario::Auto | Scenario::Any => {
                Conversation::new().with_user(message)
            }
        }
    }

    /// Builds the scenario's assistant on top of `provider`.
    ///
    /// The auto scenario tells the model today's date, taken from the
    /// local clock.
    pub fn assistant<P: ModelProvider + 'static>(
        &self,
        provider: P,
    ) -> Result<Assistant, Error> {
        self.assistant_on(provider, Local::now().date_naive())
    }

    /// Like [`Scenario::assistant`], with a fixed date.
    pub fn assistant_on<P: ModelProvider + 'static>(
        &self,
        provider: P,
        today: NaiveDate,
    ) -> Result<Assistant, Error> {
        let builder = AssistantBuilder::with_model_provider(provider)
            .with_tool_choice(self.tool_choice());
        let builder = match self {
            Scenario::Auto => builder
                .with_system_prompt(research_prompt(today))
                .with_tool(WebSearchTool),
            Scenario::Forced => builder
                .with_tool(SentimentScoresTool)
                .with_tool(CalculatorTool),
            Scenario::Any => builder
                .with_system_prompt(SUPPORT_BOT_PROMPT)
                .with_tool(SendTextTool)
                .with_tool(CustomerInfoTool),
        };
        debug!("building the `{self}` scenario");
        builder.build()
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn research_prompt(today: NaiveDate) -> String {
    format!(
        "Answer as many questions as you can using your existing knowledge. \
         Only search the web for queries that you can not confidently \
         answer. Today's date is {}. If you think a user's question involves \
         something in the future that hasn't happened yet, use the search \
         tool.",
        today.format("%B %-d %Y")
    )
}
