//! Answer composer: grounded completion over the retrieved chunks.

use std::sync::Arc;

use ai_llm_service::{BoxFuture, ChatCompletions, ChatMessage, ChatRequest};
use tracing::debug;

use crate::api_types::Query;
use crate::error::GateError;
use crate::prompt;

/// Turns a query plus its context into a natural-language answer.
pub trait AnswerComposer: Send + Sync {
    fn compose<'a>(
        &'a self,
        query: &'a Query,
        chunks: &'a [String],
        model: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, GateError>>;
}

/// Composer backed by a chat completion model.
pub struct LlmAnswerComposer {
    llm: Arc<dyn ChatCompletions>,
}

impl LlmAnswerComposer {
    pub fn new(llm: Arc<dyn ChatCompletions>) -> Self {
        Self { llm }
    }
}

impl AnswerComposer for LlmAnswerComposer {
    /// Missing content and zero choices both yield an empty answer.
    fn compose<'a>(
        &'a self,
        query: &'a Query,
        chunks: &'a [String],
        model: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, GateError>> {
        Box::pin(async move {
            let prompt = prompt::grounding_prompt(query.as_str(), chunks);
            let request = ChatRequest::new(vec![ChatMessage::user(prompt)]).with_model(model);

            let out = self.llm.complete(request).await?;
            let answer = out.first_content().unwrap_or_default().to_string();
            debug!(chunks = chunks.len(), answer_chars = answer.len(), "composer: done");
            Ok(answer)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::{AiLlmError, ChatCompletion, ChatRole};
    use std::sync::Mutex;

    struct CannedChat {
        reply: ChatCompletion,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ChatCompletions for CannedChat {
        fn complete<'a>(
            &'a self,
            request: ChatRequest,
        ) -> BoxFuture<'a, Result<ChatCompletion, AiLlmError>> {
            self.seen.lock().unwrap().push(request);
            let reply = self.reply.clone();
            Box::pin(async move { Ok(reply) })
        }
    }

    fn canned(reply: ChatCompletion) -> Arc<CannedChat> {
        Arc::new(CannedChat {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn sends_one_user_message_with_context() {
        let chat = canned(ChatCompletion::from_text("Oxford is famous for its university."));
        let composer = LlmAnswerComposer::new(chat.clone());
        let q = Query::new("What is Oxford famous for?").unwrap();
        let chunks = vec!["The University of Oxford is the oldest in the English-speaking world.".to_string()];

        let answer = composer.compose(&q, &chunks, None).await.unwrap();
        assert_eq!(answer, "Oxford is famous for its university.");

        let seen = chat.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, None);
        assert_eq!(seen[0].messages.len(), 1);
        assert_eq!(seen[0].messages[0].role, ChatRole::User);
        assert!(seen[0].messages[0].content.contains(&chunks[0]));
        assert!(seen[0].messages[0].content.contains("What is Oxford famous for?"));
    }

    #[tokio::test]
    async fn nothing_to_say_is_an_empty_answer() {
        let q = Query::new("q").unwrap();

        let composer = LlmAnswerComposer::new(canned(ChatCompletion::default()));
        assert_eq!(composer.compose(&q, &[], None).await.unwrap(), "");

        let mut reply = ChatCompletion::from_text("");
        reply.choices[0].message.content = None;
        let composer = LlmAnswerComposer::new(canned(reply));
        assert_eq!(composer.compose(&q, &[], Some("m")).await.unwrap(), "");
    }
}
