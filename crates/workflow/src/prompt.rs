//! Prompt builder — turns a mode and the form inputs into provider text.
//!
//! Pure and deterministic: the same mode and inputs always produce the same
//! prompt. The system instruction sets the persona, the user prompt carries
//! the mode-specific task.

use hookstudio_core::studio::{InputSnapshot, Mode};

use crate::parser::NUMBERED_LIST_INSTRUCTION;

const PERSONA: &str = "Você é um especialista em marketing viral para TikTok com anos de experiência em crescimento orgânico.";

/// A fully assembled request body, before it reaches a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system_instruction: String,
    pub user_prompt: String,
}

/// Build the prompt for `mode` from `input`.
pub fn build(mode: Mode, input: &InputSnapshot) -> Prompt {
    Prompt {
        system_instruction: system_instruction(mode),
        user_prompt: user_prompt(mode, input),
    }
}

fn objective(mode: Mode) -> &'static str {
    match mode {
        Mode::Hooks => {
            "Seu objetivo é criar 'hooks' (ganchos) visuais e verbais irresistíveis que parem o scroll nos primeiros 3 segundos."
        }
        Mode::Scripts => {
            "Seu objetivo é escrever roteiros completos, engajadores e com alta retenção, incluindo indicações visuais e de áudio."
        }
        Mode::Captions => {
            "Seu objetivo é escrever legendas otimizadas para SEO (TikTok Search) que incentivem comentários e compartilhamentos."
        }
        Mode::Hashtags => {
            "Seu objetivo é pesquisar e sugerir as melhores hashtags misturando nichadas, médias e amplas para maximizar o alcance."
        }
        Mode::Planner => {
            "Seu objetivo é criar um plano de conteúdo semanal estratégico e coeso."
        }
    }
}

fn system_instruction(mode: Mode) -> String {
    format!("{PERSONA} {}", objective(mode))
}

fn user_prompt(mode: Mode, input: &InputSnapshot) -> String {
    let topic = &input.topic;
    let audience = &input.audience;
    let tone = &input.tone;
    let info = input
        .extra_context()
        .map(|extra| format!("Informações extras: {extra}"))
        .unwrap_or_default();

    match mode {
        Mode::Hooks => format!(
            "Gere 10 ganchos virais (hooks) para um vídeo sobre \"{topic}\".\n\
             Público-alvo: {audience}\n\
             Tom de voz: {tone}\n\
             {info}\n\
             \n\
             {NUMBERED_LIST_INSTRUCTION}\n\
             Para cada gancho, inclua uma breve explicação da psicologia por trás."
        ),
        Mode::Scripts => format!(
            "Escreva um roteiro completo de TikTok (30 a 60 segundos) sobre \"{topic}\".\n\
             Público-alvo: {audience}\n\
             Tom de voz: {tone}\n\
             {info}\n\
             \n\
             Estrutura do roteiro:\n\
             1. Gancho Visual/Verbal (0-3s)\n\
             2. Desenvolvimento/Retenção (3-45s)\n\
             3. Call to Action (CTA) forte (45-60s)\n\
             \n\
             Inclua sugestões de cenas, textos na tela e sugestão de áudio/música."
        ),
        Mode::Captions => format!(
            "Crie 3 opções de legendas para um vídeo sobre \"{topic}\".\n\
             Público-alvo: {audience}\n\
             Tom de voz: {tone}\n\
             {info}\n\
             \n\
             As legendas devem incluir:\n\
             1. Uma primeira linha que desperte curiosidade (expandindo o gancho do vídeo).\n\
             2. Palavras-chave de SEO integradas naturalmente no texto.\n\
             3. Uma pergunta para gerar comentários."
        ),
        // No tone line for hashtags.
        Mode::Hashtags => format!(
            "Gere uma lista estratégica de 30 hashtags para um vídeo sobre \"{topic}\".\n\
             Público-alvo: {audience}\n\
             {info}\n\
             \n\
             Divida as hashtags em 3 grupos:\n\
             1. Hashtags de Nicho (Específicas)\n\
             2. Hashtags de Comunidade (Interesses relacionados)\n\
             3. Hashtags Virais/Amplas (Grande volume)\n\
             \n\
             Não use hashtags banidas ou genéricas demais que não tragam público qualificado."
        ),
        Mode::Planner => format!(
            "Crie um planejamento de conteúdo de 7 dias (1 vídeo por dia) para um perfil sobre \"{topic}\".\n\
             Público-alvo: {audience}\n\
             Estratégia/Tom: {tone}\n\
             {info}\n\
             \n\
             Para cada dia, forneça:\n\
             - Título do Vídeo\n\
             - Formato (Ex: Vlog, Tutorial, Skit, POV, Lista)\n\
             - Breve resumo do conceito\n\
             - Objetivo (Venda, Crescimento, Engajamento)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> InputSnapshot {
        InputSnapshot::new("pets", "young adults").with_tone("Divertido")
    }

    #[test]
    fn build_is_deterministic() {
        for mode in Mode::ALL {
            assert_eq!(build(mode, &pets()), build(mode, &pets()));
        }
    }

    #[test]
    fn hooks_prompt_carries_inputs_and_list_instruction() {
        let prompt = build(Mode::Hooks, &pets());
        assert!(prompt.system_instruction.starts_with(PERSONA));
        assert!(prompt.system_instruction.contains("parem o scroll"));
        assert!(prompt.user_prompt.contains("Gere 10 ganchos virais"));
        assert!(prompt.user_prompt.contains("\"pets\""));
        assert!(prompt.user_prompt.contains("Público-alvo: young adults"));
        assert!(prompt.user_prompt.contains("Tom de voz: Divertido"));
        assert!(prompt.user_prompt.contains(NUMBERED_LIST_INSTRUCTION));
    }

    #[test]
    fn extra_info_only_when_present() {
        let without = build(Mode::Scripts, &pets());
        assert!(!without.user_prompt.contains("Informações extras"));

        let blank = build(Mode::Scripts, &pets().with_additional_info("  "));
        assert!(!blank.user_prompt.contains("Informações extras"));

        let with = build(Mode::Scripts, &pets().with_additional_info("use gatos"));
        assert!(with.user_prompt.contains("Informações extras: use gatos"));
    }

    #[test]
    fn hashtags_prompt_omits_tone() {
        let prompt = build(Mode::Hashtags, &pets());
        assert!(prompt.user_prompt.contains("30 hashtags"));
        assert!(!prompt.user_prompt.contains("Divertido"));
    }

    #[test]
    fn planner_uses_strategy_label() {
        let prompt = build(Mode::Planner, &pets());
        assert!(prompt.user_prompt.contains("Estratégia/Tom: Divertido"));
        assert!(prompt.user_prompt.contains("7 dias"));
    }

    #[test]
    fn every_mode_has_its_own_objective() {
        let mut seen: Vec<String> = Mode::ALL
            .iter()
            .map(|m| build(*m, &pets()).system_instruction)
            .collect();
        seen.dedup();
        assert_eq!(seen.len(), Mode::ALL.len());
    }
}
