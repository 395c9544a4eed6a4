//! # Erros de Integridade da Entrevista
//!
//! Nenhum destes erros é uma condição normal de uso: todos indicam que
//! o contrato entre apresentação, controlador e motor de dicas foi
//! violado. Não há retry nem recuperação silenciosa — a entrevista em
//! curso é abortada e a mensagem é exibida.
//!
//! | Variante | Quem detecta | Causa |
//! |----------|--------------|-------|
//! | `InvalidAnswerKind` | Controlador | Valor fora das opções declaradas |
//! | `MissingRequiredAnswer` | Motor de dicas | Falta uma chave incondicional |
//! | `UnknownQuestion` | Fronteira JSON | Chave que não existe no catálogo |
//! | `DuplicateAnswer` | Fronteira JSON | Mesma chave respondida duas vezes |
//! | `InterviewComplete` | Controlador | Resposta após a última pergunta |
//! | `Io` | Apresentação no terminal | Falha de leitura/escrita |

use thiserror::Error;

use super::QuestionKey;

/// Erro de contrato entre os componentes da entrevista.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    /// A resposta não está entre os valores declarados da pergunta.
    #[error("respuesta inválida para '{key}': '{value}' no es una opción declarada")]
    InvalidAnswerKind { key: QuestionKey, value: String },

    /// O mapa de respostas não contém uma chave incondicional.
    #[error("falta la respuesta obligatoria '{key}'")]
    MissingRequiredAnswer { key: QuestionKey },

    #[error("pregunta desconocida: '{key}'")]
    UnknownQuestion { key: String },

    #[error("la pregunta '{key}' ya fue respondida")]
    DuplicateAnswer { key: QuestionKey },

    #[error("la entrevista ya terminó")]
    InterviewComplete,

    #[error("error de entrada/salida: {0}")]
    Io(#[from] std::io::Error),
}
