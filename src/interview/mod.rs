//! # Módulo Interview — Controlador da Entrevista
//!
//! O controlador é uma **máquina de estados explícita**: o estado é o
//! [`AnswerMap`](crate::core::AnswerMap) até aqui, e a transição
//! "qual a próxima pergunta?" é a função pura [`next_question`].
//!
//! ```text
//! {}  ──arranque_estado──▶ {arranque_estado}  ──…──▶ {…, bornes}  ──notas──▶ completo
//! ```
//!
//! Quem dirige o laço é a camada de apresentação:
//!
//! | Apresentação | Como dirige |
//! |--------------|-------------|
//! | Web (HTMX) | Um [`Interview`] por sessão; cada POST avança um passo |
//! | Terminal | [`run_interview`] bloqueia em cada pergunta via [`Presenter`] |

pub mod controller;
pub mod presenter;
pub mod terminal;

pub use controller::{next_question, Interview};
pub use presenter::{run_interview, run_sessions, Presenter};
pub use terminal::TerminalPresenter;
