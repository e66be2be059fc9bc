//! Browser bindings.
//!
//! Thin wrappers for the dashboard: rule sets and content batches arrive
//! as JS values in the persisted rule shape, results go back as plain
//! objects. All semantics live in the core modules.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::content::ContentItem;
use crate::ranking::FeedRanker;
use crate::recycle::{RecycleScorer, WeightedAverage};
use crate::rules::{Rule, RuleSet};
use crate::scoring::{Explanation, ScoringEngine};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedView<'a> {
    id: &'a str,
    index: usize,
    net_score: i64,
    explanation: &'a Explanation,
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn read_rules(rules: JsValue) -> Result<RuleSet, JsValue> {
    let rules: Vec<Rule> = serde_wasm_bindgen::from_value(rules).map_err(js_error)?;
    RuleSet::from_rules(rules).map_err(js_error)
}

/// Ranks a content batch. Returns `[{ id, index, netScore, explanation }]`.
#[wasm_bindgen(js_name = rankFeed)]
pub fn rank_feed(rules: JsValue, items: JsValue) -> Result<JsValue, JsValue> {
    let rules = read_rules(rules)?;
    let items: Vec<ContentItem> = serde_wasm_bindgen::from_value(items).map_err(js_error)?;

    let ranked = FeedRanker::new().rank(&items, rules.as_slice());
    let views: Vec<RankedView<'_>> = ranked
        .iter()
        .map(|r| RankedView {
            id: &r.item.id,
            index: r.index,
            net_score: r.net_score,
            explanation: &r.explanation,
        })
        .collect();

    serde_wasm_bindgen::to_value(&views).map_err(js_error)
}

/// Scores one item. Returns the explanation object.
#[wasm_bindgen(js_name = scoreItem)]
pub fn score_item(rules: JsValue, item: JsValue) -> Result<JsValue, JsValue> {
    let rules = read_rules(rules)?;
    let item: ContentItem = serde_wasm_bindgen::from_value(item).map_err(js_error)?;
    let explanation = ScoringEngine::new().score(&item, rules.as_slice());
    serde_wasm_bindgen::to_value(&explanation).map_err(js_error)
}

/// Recycle score of one item under a weighted-average policy.
#[wasm_bindgen(js_name = recycleScore)]
pub fn recycle_score(
    item: JsValue,
    engagement_weight: f64,
    evergreen_weight: f64,
) -> Result<f64, JsValue> {
    let item: ContentItem = serde_wasm_bindgen::from_value(item).map_err(js_error)?;
    let formula = WeightedAverage::new(engagement_weight, evergreen_weight);
    formula.validate().map_err(js_error)?;
    Ok(RecycleScorer::with_formula(formula).recycle_score(&item))
}
