use serde::Serialize;

/// A ready-made job description callers can pick instead of typing one.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobSample {
    pub title: &'static str,
    pub text: &'static str,
}

pub const JOB_SAMPLES: &[JobSample] = &[
    JobSample {
        title: "Desenvolvedor Python Pleno",
        text: "Responsavel por planejar, desenvolver e manter APIs REST escalaveis em \
            Python (FastAPI ou Django REST), aplicando principios SOLID e testes \
            automatizados com PyTest. Necessario dominio de SQL (PostgreSQL), \
            mensageria (RabbitMQ ou Kafka) e Docker. Experiencia com pipelines CI/CD \
            usando GitHub Actions ou GitLab. Diferencial: conhecimento em arquitetura \
            hexagonal e monitoracao com Prometheus/Grafana.",
    },
    JobSample {
        title: "Cientista de Dados Jr",
        text: "Atuacao em todo o ciclo de ciencia de dados, desde a ingestao e limpeza \
            de dados ate a construcao de modelos supervisionados (regressao e \
            classificacao). Ferramentas obrigatorias: Python, pandas, scikit-learn, \
            SQL e cloud (GCP ou AWS). Elaboracao de dashboards em Streamlit ou \
            Power BI para stakeholders. Desejavel nocao de MLOps, versionamento de \
            modelos (MLflow) e comunicacao tecnica clara.",
    },
    JobSample {
        title: "Analista QA Senior",
        text: "Responsavel por definir estrategias de testes ponta a ponta, incluindo \
            testes exploratorios, automatizados (Selenium, Playwright) e APIs. \
            Experiencia comprovada com pipelines CI/CD, metricas de qualidade e \
            BDD (Behave/Cucumber). Necessario conhecimento em Python para criar \
            scripts auxiliares e integracao com ferramentas de monitoramento. \
            Diferencial: vivencia em ambientes regulados (LGPD, ISO 27001) e \
            habilidades para liderar revisoes tecnicas com squads.",
    },
    JobSample {
        title: "Product Owner",
        text: "Responsavel por priorizar backlog de produto SaaS B2B, atuando junto a \
            squads multidisciplinares. Necessario dominio de elaboracao de user \
            stories, refinamento com tecnicas como MoSCoW e story mapping, alem de \
            monitorar entregas via OKRs e KPIs. Necessario conhecimento em pesquisa \
            com usuarios, desenho de roadmaps trimestrais e comunicacao executiva. \
            Diferencial: certificacao CSPO ou PSPO e experiencia com produtos de \
            dados/IA.",
    },
    JobSample {
        title: "Analista de Suporte Tecnico Junior",
        text: "Descricao da Vaga: Analista de Suporte Tecnico Junior – Porto Alegre/RS \
            (Presencial ou Hibrido). Buscamos profissional para atendimento de \
            excelencia aos usuarios internos, com foco na resolucao rapida de \
            problemas envolvendo sistemas corporativos. Responsabilidades incluem \
            registro e acompanhamento de chamados, suporte basico em instalacao e \
            configuracao de softwares institucionais, apoio em duvidas operacionais \
            e acessos, criacao de manuais/FAQs e suporte a testes, documentacao e \
            otimizacao de sistemas internos. Requisitos: cursando Bacharelado em \
            Sistemas de Informacao ou similares (a partir do 3º semestre), \
            conhecimento basico em Jira Service Desk, Movidesk ou similares, \
            nocao de SQL e analise de dados, boa comunicacao e foco no cliente, \
            organizacao e proatividade. Diferenciais: experiencia previa em suporte, \
            participacao em projetos ERP/CRM e ingles intermediario. Ambiente oferece \
            colaboracao, aprendizado continuo e trilha de desenvolvimento.",
    },
];

/// Looks a sample up by its exact title.
pub fn find_job_sample(title: &str) -> Option<&'static JobSample> {
    JOB_SAMPLES.iter().find(|s| s.title == title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_JOB_DESCRIPTION_CHARS;

    #[test]
    fn test_samples_fit_the_job_description_cap() {
        for sample in JOB_SAMPLES {
            assert!(
                sample.text.chars().count() <= DEFAULT_MAX_JOB_DESCRIPTION_CHARS,
                "{} is too long",
                sample.title
            );
            assert!(!sample.text.contains("  "), "{} has double spaces", sample.title);
        }
    }

    #[test]
    fn test_find_job_sample() {
        assert!(find_job_sample("Product Owner").is_some());
        assert!(find_job_sample("product owner").is_none());
    }
}
