use crate::report::NamingSummary;

pub fn render_report_text(summary: &NamingSummary) -> String {
    let mut out = String::new();

    out.push_str("Gene Name Assignment Report\n");
    out.push_str("===========================\n\n");

    out.push_str(&format!(
        "Tool: {} {}\n",
        summary.run.tool, summary.run.version
    ));
    out.push_str(&format!("Ranking catalog: {}\n", summary.run.rankings));
    out.push_str(&format!("Seed: {}\n", summary.run.seed));
    out.push_str(&format!("Identifiers named: {}\n\n", summary.n_bound));

    out.push_str("1. Categories (bound / requested)\n");
    for c in &summary.categories {
        out.push_str(&format!(
            "{:<22}{} / {}\n",
            c.category.label(),
            c.bound,
            c.requested
        ));
    }
    out.push('\n');

    out.push_str("2. Sampling pools\n");
    for p in &summary.pools {
        out.push_str(&format!(
            "{:<22}drew {} of {} unused names\n",
            p.category.label(),
            p.drawn,
            p.pool_size
        ));
    }
    out.push('\n');

    out.push_str("3. Caveats\n");
    if summary.unbound_targets.is_empty()
        && summary.missing_ids.is_empty()
        && summary.receptor_excluded_targets.is_empty()
        && summary.overlapping_ids == 0
        && summary.dropped_bindings == 0
    {
        out.push_str("none\n");
        return out;
    }
    for u in &summary.unbound_targets {
        out.push_str(&format!(
            "TF {} (motif {}): {} targets without a ranked name\n",
            u.tf,
            u.motif,
            u.ids.len()
        ));
    }
    if !summary.receptor_excluded_targets.is_empty() {
        out.push_str(&format!(
            "Targets named as receptors instead: {}\n",
            summary.receptor_excluded_targets.len()
        ));
    }
    if summary.overlapping_ids > 0 {
        out.push_str(&format!(
            "Identifiers listed in several categories: {}\n",
            summary.overlapping_ids
        ));
    }
    if summary.dropped_bindings > 0 {
        out.push_str(&format!(
            "Bindings dropped for already-named identifiers: {}\n",
            summary.dropped_bindings
        ));
    }
    if !summary.missing_ids.is_empty() {
        out.push_str(&format!(
            "Identifiers left unnamed: {}\n",
            summary.missing_ids.join(", ")
        ));
    }
    out
}
