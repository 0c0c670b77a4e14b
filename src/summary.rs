//! Plain-text summaries for pasting into WhatsApp.

use crate::aggregate::{orders_for_variation, report_totals};
use crate::models::{FinancialRow, Order, VariationSummary};
use crate::money::format_brl;

/// One line per variation: `<name> - <orders> pedidos - <units> unidades`.
///
/// Returns `None` when there is nothing to summarize.
pub fn variation_summary_text(variations: &[VariationSummary], orders: &[Order]) -> Option<String> {
    if variations.is_empty() {
        return None;
    }

    let mut text = String::from("Resumo de Variações:");
    for variation in variations {
        let order_count = orders_for_variation(orders, &variation.name, variation.sku.as_deref()).len();
        text.push('\n');
        text.push_str(&format!(
            "{} - {} pedidos - {} unidades",
            variation.name, order_count, variation.quantity
        ));
    }
    Some(text)
}

/// Financial report as text, one line per variation followed by the totals.
pub fn financial_summary_text(rows: &[FinancialRow]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut text = String::from("Análise Financeira por Variação:");
    for row in rows {
        text.push('\n');
        text.push_str(&format!(
            "{} - {} pedidos - carteira {} - líquido {}",
            row.variation,
            row.order_count,
            format_brl(row.net_after_fee),
            format_brl(row.final_net)
        ));
    }

    let totals = report_totals(rows);
    text.push_str(&format!(
        "\nTotal em carteira: {}\nTotal líquido: {}",
        format_brl(totals.net_after_fee),
        format_brl(totals.final_net)
    ));
    Some(text)
}
