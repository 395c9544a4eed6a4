//! # Módulo Inference — Motor de Dicas
//!
//! Dado um [`AnswerMap`](crate::core::AnswerMap) completo, avalia um
//! catálogo **fixo e ordenado** de regras condição→dica e devolve a
//! lista de dicas aplicáveis.
//!
//! ## Ordem de Avaliação
//!
//! | Etapa | Regras | Observação |
//! |-------|--------|------------|
//! | 1 | Regras do ramo (`arranque_estado`) | Só um ramo é avaliado |
//! | 2 | Regras transversais | GNC, bornes, bomba incerta |
//! | 3 | Fallback | Só se nada disparou |
//!
//! A lista **não** é deduplicada: com `no_gira` + `bornes = mal`, o
//! tópico bornes aparece duas vezes (regra do ramo + regra transversal).
//!
//! Veja [`InferenceEngine`] para detalhes.

/// Sub-módulo com as regras e o motor de avaliação.
pub mod rules;

/// Sub-módulo com o enum [`Tip`] e seus textos.
pub mod tips;

pub use rules::InferenceEngine;
pub use tips::{Tip, Topic};

/// Lista ordenada de dicas, na ordem de emissão. Nunca vazia.
pub type TipList = Vec<Tip>;
