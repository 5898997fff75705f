//! Editable score table with a live average.
//!
//! The average is recomputed from the props on every render with the same
//! arithmetic the server stores, so what the grader sees while typing is
//! what ends up in the document.

use common::model::form::EvaluationRow;
use common::score;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum Field {
    Label,
    Score,
    Grader,
    Date,
    SubScore(usize),
}

pub enum Msg {
    Edit { row: usize, field: Field, value: String },
    AddRow,
    RemoveRow(usize),
}

#[derive(Properties, PartialEq, Clone)]
pub struct ScoreTableProps {
    pub rows: Vec<EvaluationRow>,
    /// Sub-score cells per row; zero for single-score forms.
    #[prop_or_default]
    pub sub_scores: usize,
    pub on_change: Callback<Vec<EvaluationRow>>,
}

pub struct ScoreTable;

impl Component for ScoreTable {
    type Message = Msg;
    type Properties = ScoreTableProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ScoreTable
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let mut rows = ctx.props().rows.clone();
        match msg {
            Msg::Edit { row, field, value } => {
                let Some(target) = rows.get_mut(row) else {
                    return false;
                };
                edit(target, field, value);
            }
            Msg::AddRow => rows.push(EvaluationRow::with_sub_scores(ctx.props().sub_scores)),
            Msg::RemoveRow(index) => {
                if index < rows.len() {
                    rows.remove(index);
                }
            }
        }
        ctx.props().on_change.emit(rows);
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let rows = &ctx.props().rows;
        let columns = sub_score_columns(ctx.props().sub_scores, rows);

        html! {
            <div class="score-table">
                <table>
                    <thead>
                        <tr>
                            <th>{"#"}</th>
                            <th>{"Item"}</th>
                            <th>{"Score"}</th>
                            { for (1..=columns).map(|n| html! { <th>{format!("S{}", n)}</th> }) }
                            if columns > 0 {
                                <th>{"Total"}</th>
                            }
                            <th>{"Grader"}</th>
                            <th>{"Date"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for rows.iter().enumerate().map(|(index, row)| html! {
                            <tr class={classes!(row_class(row))}>
                                <td>{index + 1}</td>
                                <td>{cell(link, index, Field::Label, &row.label)}</td>
                                <td>{cell(link, index, Field::Score, &row.score)}</td>
                                { for (0..columns).map(|n| html! {
                                    <td class="sub-score">
                                        {cell(
                                            link,
                                            index,
                                            Field::SubScore(n),
                                            row.sub_scores.get(n).map(String::as_str).unwrap_or(""),
                                        )}
                                    </td>
                                }) }
                                if columns > 0 {
                                    <td class="total">{total_label(&row.sub_scores)}</td>
                                }
                                <td>{cell(link, index, Field::Grader, &row.grader)}</td>
                                <td>{cell(link, index, Field::Date, &row.date)}</td>
                                <td>
                                    <button class="icon-btn" title="Remove row"
                                        onclick={link.callback(move |_| Msg::RemoveRow(index))}>
                                        <i class="material-icons">{"delete"}</i>
                                    </button>
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
                <div class="score-footer">
                    <button onclick={link.callback(|_| Msg::AddRow)}>{"Add row"}</button>
                    <span class="average">{average_label(rows)}</span>
                </div>
            </div>
        }
    }
}

fn cell(link: &html::Scope<ScoreTable>, row: usize, field: Field, value: &str) -> Html {
    let oninput = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::Edit {
            row,
            field,
            value: input.value(),
        }
    });
    html! { <input type="text" value={value.to_string()} {oninput} /> }
}

fn edit(row: &mut EvaluationRow, field: Field, value: String) {
    match field {
        Field::Label => row.label = value,
        Field::Score => row.score = value,
        Field::Grader => row.grader = value,
        Field::Date => row.date = value,
        Field::SubScore(index) => {
            if row.sub_scores.len() <= index {
                row.sub_scores.resize(index + 1, String::new());
            }
            row.sub_scores[index] = value;
        }
    }
}

/// Loaded documents may carry more sub-scores than the form type asks for;
/// none of them is hidden.
fn sub_score_columns(configured: usize, rows: &[EvaluationRow]) -> usize {
    rows.iter()
        .map(|row| row.sub_scores.len())
        .fold(configured, usize::max)
}

fn total_label(sub_scores: &[String]) -> String {
    if sub_scores.iter().all(|s| s.trim().is_empty()) {
        return String::new();
    }
    match score::row_total(sub_scores) {
        Ok(total) => format!("{}", total),
        Err(_) => "?".to_string(),
    }
}

/// Half-filled rows are highlighted; the server refuses them.
fn row_class(row: &EvaluationRow) -> Option<&'static str> {
    (!row.is_blank() && !row.is_complete()).then_some("incomplete")
}

fn average_label(rows: &[EvaluationRow]) -> String {
    match score::average(rows) {
        Ok(Some(average)) => format!("Average: {:.2}", average),
        Ok(None) => "Average: not graded yet".to_string(),
        Err(e) => format!("Average unavailable: {}", e),
    }
}
