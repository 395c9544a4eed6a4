//! # Módulo Core — Tipos Fundamentais da Entrevista
//!
//! Este módulo agrupa os **tipos fundamentais** compartilhados pelo
//! controlador da entrevista e pelo motor de dicas:
//!
//! - [`QuestionKey`] — Identificador estável de cada pergunta (ex: `arranque_estado`)
//! - [`Branch`] — Ramo principal escolhido na primeira pergunta
//! - [`Question`] — Definição de pergunta (prompt, opções, condição)
//! - [`CATALOG`] — Catálogo ordenado com todas as perguntas
//! - [`AnswerMap`] — Respostas coletadas, em ordem de inserção
//! - [`DiagnosisError`] — Erros de integridade do contrato controlador/motor
//!
//! ## Relação entre os Tipos
//!
//! ```text
//! CATALOG: [Question; 14]
//!   │  cada Question tem um QuestionKey + Condition
//!   ▼
//! AnswerMap: [(QuestionKey, valor)]  ← preenchido pelo Interview
//!   │
//!   ▼
//! InferenceEngine::infer(&AnswerMap) → TipList (Vec<Tip>)
//! ```

/// Sub-módulo com [`AnswerMap`] — mapa ordenado de respostas.
pub mod answer;

/// Sub-módulo com [`DiagnosisError`].
pub mod error;

/// Sub-módulo com o catálogo de perguntas, [`QuestionKey`] e [`Branch`].
pub mod question;

pub use answer::AnswerMap;
pub use error::DiagnosisError;
pub use question::{Branch, Choice, Condition, Question, QuestionKey, QuestionKind, CATALOG};
