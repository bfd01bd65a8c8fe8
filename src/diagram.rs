//! The ChatGPT-5 vs Gemini 3 Pro decision tree.

use crate::draw::Painter;
use crate::ir::{Canvas, FontWeight, Point, TextStyle};
use crate::theme::Theme;
use log::debug;

pub const TITLE: &str = "Decision Tree: Gemini 3 Pro vs ChatGPT-5";
pub const CHATGPT: &str = "ChatGPT-5";
pub const GEMINI: &str = "Gemini 3 Pro";

const START_Y: f32 = 0.92;
const MAIN_X: f32 = 0.55;
const LEFT_X: f32 = 0.25;
const PATH_LABEL_X: f32 = MAIN_X + 0.15;

/// Branch line sits this far above the branch row.
const BRANCH_RISE: f32 = 0.05;
/// Connectors stop short of box edges by these offsets.
const QUESTION_HALF: f32 = 0.03;
const ARROW_TIP_DROP: f32 = 0.01;
const RESULT_DROP: f32 = 0.04;

struct Question {
    y: f32,
    branch_y: f32,
    prompt: &'static str,
    chatgpt_case: &'static str,
    /// Label on the path continuing to the next question.
    gemini_path: Option<&'static str>,
}

static QUESTIONS: [Question; 3] = [
    Question {
        y: 0.82,
        branch_y: 0.72,
        prompt: "What do you need?",
        chatgpt_case: "Fast ideas / UI experiments",
        gemini_path: Some("Polished, structured output"),
    },
    Question {
        y: 0.58,
        branch_y: 0.48,
        prompt: "What matters?",
        chatgpt_case: "Quick UI/UX tweaks",
        gemini_path: Some("Clean code & comments"),
    },
    Question {
        y: 0.34,
        branch_y: 0.24,
        prompt: "Project type?",
        chatgpt_case: "Creative / playful",
        gemini_path: None,
    },
];

const GEMINI_CASE: &str = "Stable / client-ready";

const LEGEND_BULLET_X: f32 = 0.08;
const LEGEND_TEXT_X: f32 = 0.12;

/// Draws the whole diagram and returns the finished canvas.
pub fn build_decision_tree(theme: &Theme) -> Canvas {
    let mut painter = Painter::new(theme);

    painter.draw_text(
        Point::new(0.5, 0.97),
        TITLE,
        TextStyle::centered(16.0, FontWeight::Bold, &theme.text_light),
    );

    painter.draw_start_box(Point::new(MAIN_X, START_Y), "START");
    painter.draw_arrow(
        Point::new(MAIN_X, START_Y - 0.02),
        Point::new(MAIN_X, QUESTIONS[0].y + QUESTION_HALF),
    );

    for (idx, question) in QUESTIONS.iter().enumerate() {
        draw_question(&mut painter, question, QUESTIONS.get(idx + 1));
    }

    let last_branch = QUESTIONS[QUESTIONS.len() - 1].branch_y;
    painter.draw_arrow(
        Point::new(MAIN_X, last_branch + BRANCH_RISE),
        Point::new(MAIN_X, last_branch - ARROW_TIP_DROP),
    );
    painter.draw_result_box(
        Point::new(MAIN_X, last_branch - RESULT_DROP),
        GEMINI_CASE,
        GEMINI,
        &theme.gemini_color,
    );

    draw_legend(&mut painter);

    let canvas = painter.finish();
    debug!(primitives = canvas.len(); "Decision tree drawn");
    canvas
}

fn draw_question(painter: &mut Painter, question: &Question, next: Option<&Question>) {
    let fork = Point::new(MAIN_X, question.branch_y + BRANCH_RISE);
    let left_fork = Point::new(LEFT_X, fork.y);
    let chatgpt_color = painter.theme().chatgpt_color.clone();
    let muted = painter.theme().text_muted.clone();

    painter.draw_question_box(Point::new(MAIN_X, question.y), question.prompt);

    painter.draw_line(Point::new(MAIN_X, question.y - QUESTION_HALF), fork);
    painter.draw_line(fork, left_fork);
    painter.draw_arrow(
        left_fork,
        Point::new(LEFT_X, question.branch_y - ARROW_TIP_DROP),
    );
    painter.draw_result_box(
        Point::new(LEFT_X, question.branch_y - RESULT_DROP),
        question.chatgpt_case,
        CHATGPT,
        &chatgpt_color,
    );

    let Some(next) = next else {
        return;
    };
    let next_top = Point::new(MAIN_X, next.y + QUESTION_HALF);
    painter.draw_arrow(fork, next_top);
    if let Some(path_label) = question.gemini_path {
        let mid = fork.midpoint(next_top);
        painter.draw_text(
            Point::new(PATH_LABEL_X, mid.y),
            path_label,
            TextStyle::left(9.0, FontWeight::Normal, &muted),
        );
    }
}

fn draw_legend(painter: &mut Painter) {
    let theme = painter.theme().clone();
    let entries = [
        (0.08, "ChatGPT-5 — Fast, expressive, experimental", &theme.chatgpt_color),
        (0.04, "Gemini 3 Pro — Polished, stable, structured", &theme.gemini_color),
    ];

    for (y, description, color) in entries {
        painter.draw_text(
            Point::new(LEGEND_BULLET_X, y),
            "●",
            TextStyle::centered(14.0, FontWeight::Normal, color),
        );
        painter.draw_text(
            Point::new(LEGEND_TEXT_X, y),
            description,
            TextStyle::left(10.0, FontWeight::Normal, &theme.text_muted),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Primitive, PrimitiveCounts};

    #[test]
    fn primitive_counts_are_fixed() {
        let canvas = build_decision_tree(&Theme::dark());
        assert_eq!(
            canvas.counts(),
            PrimitiveCounts {
                plain_boxes: 0,
                start_boxes: 1,
                question_boxes: 3,
                result_boxes: 4,
                lines: 6,
                arrows: 7,
                texts: 11,
            }
        );
    }

    #[test]
    fn title_is_painted_first() {
        let canvas = build_decision_tree(&Theme::dark());
        let Some(Primitive::Text(title)) = canvas.primitives().first() else {
            panic!("title should be the first primitive");
        };
        assert_eq!(title.text, TITLE);
    }

    #[test]
    fn path_labels_sit_between_fork_and_next_question() {
        let canvas = build_decision_tree(&Theme::dark());
        let label = canvas
            .primitives()
            .iter()
            .find_map(|p| match p {
                Primitive::Text(t) if t.text == "Polished, structured output" => Some(t),
                _ => None,
            })
            .expect("path label present");
        assert!((label.position.y - (0.72 + 0.05 + 0.58 + 0.03) / 2.0).abs() < 1e-6);
        assert!((label.position.x - 0.70).abs() < 1e-6);
    }

    #[test]
    fn building_twice_is_identical() {
        let theme = Theme::dark();
        let first = build_decision_tree(&theme);
        let second = build_decision_tree(&theme);
        assert_eq!(first.primitives(), second.primitives());
    }
}
