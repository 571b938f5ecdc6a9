use super::config::ScoringConfig;
use crate::catalog::PostSlug;
use crate::quiz::answers::QuizAnswers;

pub const MAX_RELATED: usize = 3;

/// Goal-mapped articles (goal order) followed by role-mapped ones, first seen wins.
pub(crate) fn related_articles(answers: &QuizAnswers, config: &ScoringConfig) -> Vec<PostSlug> {
    let from_goals = answers
        .goals()
        .iter()
        .filter_map(|goal| config.goal_articles.get(goal))
        .flatten();
    let from_role = answers
        .role
        .and_then(|role| config.role_articles.get(&role))
        .into_iter()
        .flatten();

    let mut related: Vec<PostSlug> = Vec::with_capacity(MAX_RELATED);
    for slug in from_goals.chain(from_role) {
        if related.len() == MAX_RELATED {
            break;
        }
        if !related.contains(slug) {
            related.push(slug.clone());
        }
    }
    related
}
