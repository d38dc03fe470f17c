//! Context transfer — carrying a finished result into the next mode.
//!
//! Which targets a mode may hand off to is fixed by [`next_steps`]. The text
//! carried over is built by [`context_for`] and wrapped by [`context_block`]
//! before it is appended to the user's additional info.

use hookstudio_core::studio::{Mode, ParsedItem};

/// One suggested follow-up from a finished result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextStep {
    /// Action label shown to the user
    pub label: &'static str,
    pub target: Mode,
}

const FROM_HOOKS: &[NextStep] = &[
    NextStep {
        label: "Criar Roteiro",
        target: Mode::Scripts,
    },
    NextStep {
        label: "Criar Legendas",
        target: Mode::Captions,
    },
];

const FROM_SCRIPTS: &[NextStep] = &[
    NextStep {
        label: "Criar Legendas",
        target: Mode::Captions,
    },
    NextStep {
        label: "Gerar Hashtags",
        target: Mode::Hashtags,
    },
];

const FROM_PLANNER: &[NextStep] = &[NextStep {
    label: "Criar Roteiro de um tópico",
    target: Mode::Scripts,
}];

/// The follow-ups offered after a result in `mode`, in display order.
pub fn next_steps(mode: Mode) -> &'static [NextStep] {
    match mode {
        Mode::Hooks => FROM_HOOKS,
        Mode::Scripts => FROM_SCRIPTS,
        Mode::Planner => FROM_PLANNER,
        Mode::Captions | Mode::Hashtags => &[],
    }
}

/// Whether `from` may hand its result to `to`.
pub fn allows(from: Mode, to: Mode) -> bool {
    next_steps(from).iter().any(|step| step.target == to)
}

/// The text to carry forward from a result in `origin`.
///
/// For hooks, a selected item narrows the context to that item alone; with
/// no selection the whole list goes along with an instruction to pick one.
/// Hooks content that parsed into no items, and every other mode, carries
/// its full content.
pub fn context_for(
    origin: Mode,
    content: &str,
    items: &[ParsedItem],
    selected: Option<usize>,
) -> String {
    if origin != Mode::Hooks || items.is_empty() {
        return content.to_string();
    }

    match selected.and_then(|i| items.get(i)) {
        Some(item) => format!(
            "Baseado EXCLUSIVAMENTE neste Hook selecionado:\n\"{}\"\n\n(Ignore os outros hooks gerados anteriormente).",
            item.as_str()
        ),
        None => format!(
            "Lista de Hooks gerada:\n{content}\n\nEscolha o melhor hook dessa lista e crie o conteúdo."
        ),
    }
}

/// Wrap `context` in the header appended to additional info.
pub fn context_block(origin_title: &str, context: &str) -> String {
    format!("\n\n--- CONTEXTO ({origin_title}) ---\n{context}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn table_matches_modes() {
        let targets = |m: Mode| next_steps(m).iter().map(|s| s.target).collect::<Vec<_>>();
        assert_eq!(targets(Mode::Hooks), vec![Mode::Scripts, Mode::Captions]);
        assert_eq!(targets(Mode::Scripts), vec![Mode::Captions, Mode::Hashtags]);
        assert_eq!(targets(Mode::Planner), vec![Mode::Scripts]);
        assert!(next_steps(Mode::Captions).is_empty());
        assert!(next_steps(Mode::Hashtags).is_empty());
    }

    #[test]
    fn allows_follows_table() {
        assert!(allows(Mode::Hooks, Mode::Scripts));
        assert!(allows(Mode::Planner, Mode::Scripts));
        assert!(!allows(Mode::Hooks, Mode::Hashtags));
        assert!(!allows(Mode::Captions, Mode::Scripts));
        assert!(!allows(Mode::Scripts, Mode::Scripts));
    }

    #[test]
    fn selected_hook_is_exclusive() {
        let content = "1. Foo\n2. Bar";
        let items = parse(Mode::Hooks, content);
        let ctx = context_for(Mode::Hooks, content, &items, Some(1));
        assert_eq!(
            ctx,
            "Baseado EXCLUSIVAMENTE neste Hook selecionado:\n\"2. Bar\"\n\n(Ignore os outros hooks gerados anteriormente)."
        );
    }

    #[test]
    fn unselected_hooks_carry_whole_list() {
        let content = "1. Foo\n2. Bar";
        let items = parse(Mode::Hooks, content);
        let ctx = context_for(Mode::Hooks, content, &items, None);
        assert!(ctx.starts_with("Lista de Hooks gerada:\n1. Foo\n2. Bar"));
        assert!(ctx.ends_with("Escolha o melhor hook dessa lista e crie o conteúdo."));

        // A stale index behaves like no selection
        let ctx = context_for(Mode::Hooks, content, &items, Some(9));
        assert!(ctx.starts_with("Lista de Hooks gerada:"));
    }

    #[test]
    fn unparsed_hooks_carry_raw_content() {
        let content = "Sem lista aqui";
        assert_eq!(context_for(Mode::Hooks, content, &[], None), content);
    }

    #[test]
    fn other_modes_carry_full_content() {
        let script = "Cena 1: close no gato\nCTA: siga para mais";
        assert_eq!(context_for(Mode::Scripts, script, &[], None), script);
        assert_eq!(context_for(Mode::Planner, "Dia 1", &[], Some(0)), "Dia 1");
    }

    #[test]
    fn block_has_header() {
        assert_eq!(
            context_block("Ideias de Ganchos", "X"),
            "\n\n--- CONTEXTO (Ideias de Ganchos) ---\nX"
        );
    }
}
