//! # Presenter — A Fronteira com a Apresentação
//!
//! O núcleo consome duas capacidades bloqueantes (`ask_choice`,
//! `ask_text`) e produz para uma terceira (`render_result`). Qualquer
//! apresentação síncrona (terminal, testes roteirizados) implementa
//! [`Presenter`] e reaproveita [`run_interview`] / [`run_sessions`].
//!
//! ```text
//! run_sessions
//!   └── loop
//!       ├── run_interview   → AnswerMap   (Interview novo, mapa vazio)
//!       ├── InferenceEngine → Vec<Tip>
//!       └── render_result   → reiniciar?  (não → fim)
//! ```

use std::io;

use crate::core::{AnswerMap, Choice, DiagnosisError, QuestionKind};
use crate::inference::{InferenceEngine, Tip};

use super::Interview;

/// Capacidades de apresentação consumidas pelo controlador.
pub trait Presenter {
    /// Exibe a pergunta e bloqueia até o usuário escolher.
    /// Deve devolver um dos `value` de `options`.
    fn ask_choice(&mut self, prompt: &str, options: &[Choice]) -> io::Result<String>;

    /// Exibe a pergunta de texto livre e bloqueia até a resposta.
    fn ask_text(&mut self, prompt: &str, optional: bool) -> io::Result<String>;

    /// Mostra respostas e dicas. Devolve `true` se o usuário pediu uma
    /// nova entrevista.
    fn render_result(&mut self, answers: &AnswerMap, tips: &[Tip]) -> io::Result<bool>;
}

/// Conduz uma entrevista completa através do `presenter`.
///
/// # Erros
///
/// `InvalidAnswerKind` se o presenter devolver um valor fora das opções;
/// `Io` se a apresentação falhar.
pub fn run_interview<P: Presenter + ?Sized>(presenter: &mut P) -> Result<AnswerMap, DiagnosisError> {
    let mut interview = Interview::new();
    while let Some(question) = interview.current() {
        let value = match question.kind {
            QuestionKind::Choice(options) => presenter.ask_choice(question.prompt, options)?,
            QuestionKind::Text { optional, .. } => presenter.ask_text(question.prompt, optional)?,
        };
        interview.answer(&value)?;
    }
    Ok(interview.into_answers())
}

/// Repete entrevistas até o usuário não pedir outra.
///
/// Cada volta começa com um mapa **novo e vazio**. Retorna quantas
/// entrevistas foram concluídas.
pub fn run_sessions<P: Presenter + ?Sized>(presenter: &mut P) -> Result<usize, DiagnosisError> {
    let mut completed = 0;
    loop {
        let answers = run_interview(presenter)?;
        let tips = InferenceEngine::infer(&answers)?;
        completed += 1;
        tracing::info!(
            branch = ?answers.branch(),
            tips = tips.len(),
            "Entrevista concluída"
        );
        if !presenter.render_result(&answers, &tips)? {
            return Ok(completed);
        }
    }
}
