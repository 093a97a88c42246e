use graph_core::Metric;
use std::collections::{BTreeMap, BTreeSet};

/// One graph directive, e.g. `{cpu:5!}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub metric:  Metric,
    /// Number of glyphs to draw (≥ 1); 1 = latest value only.
    pub history: usize,
    /// Prepend the metric's display label.
    pub label:   bool,
}

impl Directive {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            history: 1,
            label: false,
        }
    }
}

/// A parsed element of the format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim, with `{{`/`}}` already unescaped.
    Literal(String),
    Graph(Directive),
}

/// The ordered segments of a format string.  Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatProgram {
    segments: Vec<Segment>,
}

impl FormatProgram {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Graph(d) => Some(d),
            Segment::Literal(_) => None,
        })
    }

    /// Every metric referenced at least once, in a stable order.
    pub fn metrics(&self) -> BTreeSet<Metric> {
        self.directives().map(|d| d.metric.clone()).collect()
    }

    /// History ring capacity per referenced metric: the longest history any
    /// directive asks for.
    pub fn capacities(&self) -> BTreeMap<Metric, usize> {
        let mut caps = BTreeMap::new();
        for d in self.directives() {
            let cap = caps.entry(d.metric.clone()).or_insert(1);
            *cap = (*cap).max(d.history);
        }
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacities_take_the_longest_history() {
        let program = FormatProgram::new(vec![
            Segment::Graph(Directive { history: 3, ..Directive::new(Metric::Cpu) }),
            Segment::Literal("|".into()),
            Segment::Graph(Directive::new(Metric::Cpu)),
            Segment::Graph(Directive { history: 10, ..Directive::new(Metric::Cpu) }),
            Segment::Graph(Directive::new(Metric::Mem)),
        ]);

        let caps = program.capacities();
        assert_eq!(caps.get(&Metric::Cpu), Some(&10));
        assert_eq!(caps.get(&Metric::Mem), Some(&1));
        assert_eq!(caps.len(), 2);
        assert_eq!(program.directives().count(), 4);
    }


    #[test]
    fn each_interface_gets_its_own_ring() {
        let eth = Metric::from_name("net.eth0").unwrap();
        let program = FormatProgram::new(vec![
            Segment::Graph(Directive { history: 4, ..Directive::new(eth.clone()) }),
            Segment::Graph(Directive::new(Metric::NET)),
        ]);

        let caps = program.capacities();
        assert_eq!(caps.get(&eth), Some(&4));
        assert_eq!(caps.get(&Metric::NET), Some(&1));
    }
}
