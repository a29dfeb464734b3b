use std::fmt::{Debug, Display};

use serde::Serialize;
use socketed::engine::for_each_plan;
use socketed::{Combinator, Container, Owned, Plan, Planned};

#[derive(Debug, thiserror::Error)]
pub enum VizError {
    #[error("failed to serialize pipeline trace: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "typ", rename_all = "snake_case")]
pub enum VizAction {
    // one combinator application
    Stage {
        plan: Plan,
        input_len: usize,
        output_len: usize,
        txt: String,
    },
    // info text display
    InfoCard {
        info_header: String,
        info_txt: String,
    },
}

/// A recorded pipeline run.
///
/// ```rust
/// use socketed::{filter, map, Shape, Strategy};
/// use socketed_visualize::{Viz, VizAction};
///
/// let mut viz = Viz::new("one to five");
/// let doubled = viz.step((1..=5).collect::<Vec<u32>>(), map(|x: u32| x * 2));
/// let big = viz.step(doubled, filter(|x: &u32| *x > 4));
/// assert_eq!(big, vec![6, 8, 10]);
///
/// match &viz.actions()[1] {
///     VizAction::Stage { plan, input_len, output_len, .. } => {
///         assert_eq!(plan.shape, Shape::Vector);
///         assert_eq!(plan.strategy, Strategy::Compact);
///         assert_eq!((*input_len, *output_len), (5, 3));
///     }
///     other => panic!("unexpected action {other:?}"),
/// }
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Viz {
    seed_txt: String,
    actions: Vec<VizAction>,
}

impl Viz {
    pub fn new(seed_txt: impl Into<String>) -> Self {
        Viz {
            seed_txt: seed_txt.into(),
            actions: Vec::new(),
        }
    }

    /// Apply `combinator` to `container`, recording the plan it runs under and the
    /// container sizes before and after.
    pub fn step<C, K>(&mut self, container: C, mut combinator: K) -> K::Output
    where
        C: Container,
        K: Planned<C, Owned>,
        K::Output: Container + Debug,
    {
        let input_len = container.size();
        let out = combinator.apply(container);
        self.actions.push(VizAction::Stage {
            plan: K::PLAN,
            input_len,
            output_len: out.size(),
            txt: format!("{:?}", out),
        });
        out
    }

    /// [`Viz::step`] for the fallible combinators. A failure is recorded as an info card
    /// naming the stage and the error, and handed back unchanged.
    pub fn try_step<C, K, T, E>(&mut self, container: C, mut combinator: K) -> Result<T, E>
    where
        C: Container,
        K: Planned<C, Owned> + Combinator<C, Owned, Output = Result<T, E>>,
        T: Container + Debug,
        E: Display,
    {
        let input_len = container.size();
        let plan = K::PLAN;
        match combinator.apply(container) {
            Ok(out) => {
                self.actions.push(VizAction::Stage {
                    plan,
                    input_len,
                    output_len: out.size(),
                    txt: format!("{:?}", out),
                });
                Ok(out)
            }
            Err(e) => {
                self.actions.push(VizAction::InfoCard {
                    info_header: "error during step".to_string(),
                    info_txt: format!("{:?} over {}: {}", plan.op, plan.shape, e),
                });
                Err(e)
            }
        }
    }

    /// Run `f` over every element of `container` and record the visit.
    pub fn visit<C, F>(&mut self, container: &C, f: F)
    where
        C: Container,
        F: FnMut(socketed::Ref<'_, C>),
    {
        let len = container.size();
        socketed::for_each(f).apply(container);
        self.actions.push(VizAction::Stage {
            plan: for_each_plan::<C>(),
            input_len: len,
            output_len: len,
            txt: String::new(),
        });
    }

    /// Put an info card in front of everything recorded so far.
    pub fn label(mut self, info_header: String, info_txt: String) -> Self {
        let mut actions = vec![VizAction::InfoCard {
            info_header,
            info_txt,
        }];
        actions.append(&mut self.actions);
        self.actions = actions;

        self
    }

    /// Concatenate two traces, with an info card marking the seam.
    pub fn fuse(mut self, next: Self, info_header: String, info_txt: String) -> Self {
        self.actions.push(VizAction::InfoCard {
            info_header,
            info_txt,
        });
        self.actions.extend(next.actions);
        self
    }

    pub fn seed_txt(&self) -> &str {
        &self.seed_txt
    }

    pub fn actions(&self) -> &[VizAction] {
        &self.actions
    }
}

pub fn serialize_json(v: &Viz) -> Result<String, VizError> {
    Ok(serde_json::to_string(v)?)
}

/// A standalone HTML page rendering the trace as a column of cards.
pub fn serialize_html(v: &Viz) -> Result<String, VizError> {
    // keep a `</script>` inside any recorded text from closing the data block
    let data = serialize_json(v)?.replace("</", "<\\/");

    let mut out =
        String::with_capacity(TEMPLATE_BEFORE.len() + data.len() + TEMPLATE_AFTER.len());
    out.push_str(TEMPLATE_BEFORE);
    out.push_str(&data);
    out.push_str(TEMPLATE_AFTER);

    Ok(out)
}

static TEMPLATE_BEFORE: &str = r###"<!DOCTYPE html>
<meta charset="UTF-8">
<style>

body {
  background-color: lightcyan;
  font-family: verdana;
}

.card {
  background-color: white;
  border-style: solid;
  width: 500px;
  padding: 10px;
  margin-bottom: 10px;
  border-radius: 10px;
}

.card.stage {
  border-color: steelBlue;
}

.card.info_card {
  border-color: mediumVioletRed;
}

.card .cardheader {
  font-size: 20px;
  padding-bottom: 5px;
  border-bottom: solid;
  border-width: 3px;
}

.card .cardbody {
  font-size: 14px;
  padding: 10px;
  font-family: "Lucida Console", "Courier New", monospace;
  background-color: steelblue;
  color: white;
  white-space: pre-wrap;
}

</style>

<body>
<h1 id="seed"></h1>
<div id="actions"></div>

<script>

const data = "###;

static TEMPLATE_AFTER: &str = r###";

function card(typ, header, body) {
  const div = document.createElement("div");
  div.className = "card " + typ;
  const h = document.createElement("div");
  h.className = "cardheader";
  h.textContent = header;
  const b = document.createElement("div");
  b.className = "cardbody";
  b.textContent = body;
  div.appendChild(h);
  div.appendChild(b);
  return div;
}

document.getElementById("seed").textContent = data.seed_txt;

const root = document.getElementById("actions");
for (const action of data.actions) {
  if (action.typ === "stage") {
    const p = action.plan;
    const header = p.op + " over " + p.shape + " (" + p.strategy + ")";
    const body = action.input_len + " -> " + action.output_len + "\n" + action.txt;
    root.appendChild(card(action.typ, header, body));
  } else {
    root.appendChild(card(action.typ, action.info_header, action.info_txt));
  }
}

</script>
</body>
"###;
