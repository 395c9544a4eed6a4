//! # Apresentação no Terminal
//!
//! [`TerminalPresenter`] implementa [`Presenter`] sobre qualquer par
//! `BufRead` + `Write` — `stdin`/`stdout` no binário, buffers em memória
//! nos testes.
//!
//! ```text
//! ¿Qué hace al intentar arrancar?
//!   1) No gira nada
//!   2) Gira el burro
//!   3) Arranca pero se apaga
//!   4) Arranca y queda
//! > 2
//! ```

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;

use crate::core::{question, AnswerMap, Choice};
use crate::inference::Tip;
use crate::markup::{self, Segment};

use super::Presenter;

pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    /// Cria o presenter com cores ANSI habilitadas.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Converte `**negrito**` em ANSI bold (ou remove a marcação sem cor).
    fn styled(&self, text: &str) -> String {
        markup::segments(text)
            .into_iter()
            .map(|segment| match segment {
                Segment::Plain(t) => t.to_string(),
                Segment::Bold(t) if self.color => t.bold().to_string(),
                Segment::Bold(t) => t.to_string(),
            })
            .collect()
    }

    /// Lê uma linha, sem o `\n`. `None` em fim de entrada.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn closed() -> io::Error {
        io::Error::new(io::ErrorKind::UnexpectedEof, "entrada cerrada: entrevista abandonada")
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn ask_choice(&mut self, prompt: &str, options: &[Choice]) -> io::Result<String> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.styled(prompt))?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, self.styled(option.label))?;
        }
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let line = self.read_line()?.ok_or_else(Self::closed)?;
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    return Ok(options[n - 1].value.to_string());
                }
                _ => writeln!(self.output, "Elegí un número entre 1 y {}.", options.len())?,
            }
        }
    }

    fn ask_text(&mut self, prompt: &str, optional: bool) -> io::Result<String> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.styled(prompt))?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let line = match self.read_line()? {
                Some(line) => line.trim().to_string(),
                None if optional => return Ok(String::new()),
                None => return Err(Self::closed()),
            };
            if optional || !line.is_empty() {
                return Ok(line);
            }
            writeln!(self.output, "Esta respuesta es obligatoria.")?;
        }
    }

    fn render_result(&mut self, answers: &AnswerMap, tips: &[Tip]) -> io::Result<bool> {
        let title = "Resultado orientativo";
        if self.color {
            writeln!(self.output, "\n{}", title.bold().underline())?;
        } else {
            writeln!(self.output, "\n{}", title)?;
        }

        let width = answers.keys().map(|k| k.as_str().len()).max().unwrap_or(0);
        for (key, value) in answers.iter() {
            // Mostra o label quando a resposta é uma opção declarada
            let shown = question::find(key)
                .and_then(|q| q.label_for(value))
                .map(markup::plain)
                .unwrap_or_else(|| value.to_string());
            writeln!(self.output, "  {:<width$}  {}", key.as_str(), shown, width = width)?;
        }

        writeln!(self.output, "\nConsejos para seguir")?;
        for tip in tips {
            writeln!(self.output, "  - {}", self.styled(tip.text()))?;
        }
        writeln!(self.output, "\nOrientativo. Usá criterio de taller.")?;

        write!(self.output, "\n¿Nueva entrevista? (s/N) ")?;
        self.output.flush()?;
        let reply = self.read_line()?.unwrap_or_default();
        Ok(matches!(reply.trim().to_lowercase().as_str(), "s" | "si" | "sí"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::interview::{run_interview, run_sessions};

    fn presenter(script: &str) -> TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPresenter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new()).with_color(false)
    }

    fn output(p: &TerminalPresenter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output.clone()).unwrap()
    }

    #[test]
    fn numbered_choices_map_to_values() {
        // 4 = arranca_ok, depois bomba/check/combustible/edad/bornes, notas vazia
        let mut p = presenter("4\n1\n1\n2\n3\n1\n\n");
        let answers = run_interview(&mut p).unwrap();
        assert_eq!(answers.branch().map(|b| b.as_value()), Some("arranca_ok"));
        assert_eq!(answers.get(crate::core::QuestionKey::Combustible), Some("gnc"));
        assert_eq!(answers.get(crate::core::QuestionKey::EdadBateria), Some("mayor"));
        let out = output(&p);
        assert!(out.contains("  1) No gira nada"));
        assert!(out.contains("¿Qué hace al intentar arrancar?"));
    }

    #[test]
    fn out_of_range_reprompts() {
        let mut p = presenter("9\nx\n2\n");
        let value = p.ask_choice("Pregunta", &question::CATALOG[0].choices()[..2]).unwrap();
        assert_eq!(value, "gira");
        assert_eq!(output(&p).matches("Elegí un número entre 1 y 2.").count(), 2);
    }

    #[test]
    fn eof_mid_interview_is_an_error() {
        let mut p = presenter("2\n");
        assert!(run_interview(&mut p).is_err());
    }

    #[test]
    fn optional_text_accepts_eof() {
        let mut p = presenter("");
        assert_eq!(p.ask_text("Notas", true).unwrap(), "");
    }

    #[test]
    fn result_lists_answers_and_tips_then_asks_restart() {
        let mut p = presenter("4\n1\n1\n1\n1\n2\nllovió toda la noche\nn\n");
        assert_eq!(run_sessions(&mut p).unwrap(), 1);
        let out = output(&p);
        assert!(out.contains("Resultado orientativo"));
        assert!(out.contains("llovió toda la noche"));
        assert!(out.contains("Sulfatados / flojos"));
        // arranca_ok + bornes=mal → dica do ramo e limpeza de bornes
        let replicate = out.find("replicar condición de falla").unwrap();
        let terminals = out.find("Limpieza de bornes").unwrap();
        assert!(replicate < terminals);
        assert!(out.contains("¿Nueva entrevista? (s/N)"));
    }

    #[test]
    fn bold_is_stripped_without_color() {
        let p = presenter("");
        assert_eq!(p.styled("Sin **CHECK**"), "Sin CHECK");
    }
}
