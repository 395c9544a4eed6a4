//! # Interview — Uma Passada Pelo Catálogo
//!
//! Cada pergunta aplicável é feita **exatamente uma vez**, na ordem do
//! [`CATALOG`]. Não há voltar nem sair antes: abandonar a entrevista é
//! simplesmente descartar o [`Interview`].

use crate::core::{AnswerMap, DiagnosisError, Question, CATALOG};

/// Próxima pergunta a fazer, ou `None` se a entrevista terminou.
///
/// É a primeira pergunta do catálogo que ainda não foi respondida e
/// cuja condição vale para as respostas atuais. Como as condições só
/// olham para `arranque_estado` (a primeira pergunta), isso equivale a
/// avaliar cada condição no momento em que o controlador a alcança.
pub fn next_question(answers: &AnswerMap) -> Option<&'static Question> {
    CATALOG
        .iter()
        .find(|q| !answers.contains(q.key) && q.is_asked(answers))
}

/// Estado de uma entrevista em curso.
#[derive(Clone, Debug, Default)]
pub struct Interview {
    answers: AnswerMap,
}

impl Interview {
    /// Nova entrevista, com mapa de respostas vazio.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&'static Question> {
        next_question(&self.answers)
    }

    /// Registra a resposta da pergunta atual e devolve a próxima.
    ///
    /// # Erros
    ///
    /// - `InterviewComplete` se não há pergunta pendente
    /// - `InvalidAnswerKind` se o valor não é uma opção declarada
    ///   (o mapa não é alterado)
    pub fn answer(&mut self, value: &str) -> Result<Option<&'static Question>, DiagnosisError> {
        let question = self.current().ok_or(DiagnosisError::InterviewComplete)?;
        question.check_answer(value)?;

        let inserted = self.answers.insert(question.key, value.to_string());
        debug_assert!(inserted, "next_question never returns an answered key");
        tracing::debug!(key = %question.key, step = self.answers.len(), "Resposta registrada");

        Ok(self.current())
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    /// Número (1-based) da pergunta atual.
    pub fn step(&self) -> usize {
        self.answers.len() + 1
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerMap {
        self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QuestionKey;

    /// Responde sempre a primeira opção, exceto onde `overrides` manda.
    fn walk(overrides: &[(QuestionKey, &str)]) -> AnswerMap {
        let mut interview = Interview::new();
        while let Some(q) = interview.current() {
            let value = overrides
                .iter()
                .find(|(k, _)| *k == q.key)
                .map(|(_, v)| *v)
                .or_else(|| q.choices().first().map(|c| c.value))
                .unwrap_or("");
            interview.answer(value).unwrap();
        }
        interview.into_answers()
    }

    fn keys(answers: &AnswerMap) -> Vec<&'static str> {
        answers.keys().map(|k| k.as_str()).collect()
    }

    #[test]
    fn gira_branch_keys() {
        let answers = walk(&[(QuestionKey::ArranqueEstado, "gira")]);
        assert_eq!(
            keys(&answers),
            [
                "arranque_estado",
                "vel_burro",
                "intentos_explosion",
                "olor_nafta",
                "bomba_suena",
                "check",
                "combustible",
                "edad_bateria",
                "bornes",
                "notas",
            ]
        );
    }

    #[test]
    fn no_gira_branch_keys() {
        let answers = walk(&[(QuestionKey::ArranqueEstado, "no_gira")]);
        assert_eq!(&keys(&answers)[..4], ["arranque_estado", "tablero", "clic_llave", "luces"]);
        assert_eq!(answers.len(), 10);
    }

    #[test]
    fn arranca_se_apaga_asks_only_frio_caliente() {
        let answers = walk(&[(QuestionKey::ArranqueEstado, "arranca_se_apaga")]);
        assert_eq!(&keys(&answers)[..2], ["arranque_estado", "frio_caliente"]);
        assert_eq!(answers.len(), 8);
    }

    #[test]
    fn arranca_ok_has_no_branch_questions() {
        let answers = walk(&[(QuestionKey::ArranqueEstado, "arranca_ok")]);
        assert_eq!(
            keys(&answers),
            ["arranque_estado", "bomba_suena", "check", "combustible", "edad_bateria", "bornes", "notas"]
        );
    }

    #[test]
    fn invalid_choice_leaves_map_untouched() {
        let mut interview = Interview::new();
        let err = interview.answer("rueda_pinchada").unwrap_err();
        assert!(matches!(
            err,
            DiagnosisError::InvalidAnswerKind { key: QuestionKey::ArranqueEstado, .. }
        ));
        assert!(interview.answers().is_empty());
        assert_eq!(interview.step(), 1);
    }

    #[test]
    fn answering_after_completion_fails() {
        let mut interview = Interview::new();
        for value in ["arranca_ok", "si", "ok", "nafta", "menor", "ok", ""] {
            interview.answer(value).unwrap();
        }
        assert!(interview.is_complete());
        assert!(matches!(
            interview.answer("si"),
            Err(DiagnosisError::InterviewComplete)
        ));
    }

    #[test]
    fn next_question_is_pure() {
        let answers = AnswerMap::from_pairs([("arranque_estado", "no_gira")]).unwrap();
        let a = next_question(&answers).map(|q| q.key);
        let b = next_question(&answers).map(|q| q.key);
        assert_eq!(a, Some(QuestionKey::Tablero));
        assert_eq!(a, b);
    }
}
