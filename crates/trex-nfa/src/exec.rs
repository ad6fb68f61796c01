//! The traversal executor.
//!
//! A cooperative scheduler drives every traversal of one run: a FIFO
//! work deque holds `(node, state)` pairs, and the nodes publish their
//! outcomes to the executor over a channel — fan-out notifications,
//! dead ends, matches, search results and partial-search restarts.
//! FIFO order keeps scheduling fair: no traversal starves another,
//! however wide a split fans out.
//!
//! Accounting follows one invariant: a split emits its `Fork(n-1)`
//! *before* any child is dispatched, so the live-traversal count can
//! never dip to zero while work is still in flight. When the count
//! reaches zero the run is over and the recorded results are
//! assembled. A monotonic deadline is checked on every scheduler
//! iteration; overrunning it is a fatal error, not a result.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crossbeam::channel::{unbounded, Receiver, Sender};
use rand::Rng;

use trex_uniset::Uniset;
use trex_util::{
    Capture, CaptureKey, CaptureMap, CaptureValue, CaptureValues, Extent, FxHashSet, GroupName,
    InputText, MatchResult, Multiple, Options, ReturnForm, SearchResult,
};

use crate::error::RunError;
use crate::graph::Graph;
use crate::node::{Node, NodeId};
use crate::state::{GenState, ParseState, Traversal};

/// What result type a run reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Match,
    Search,
}

/// A message from the graph to the executor.
enum Event {
    /// A split fanned a traversal out into this many extra copies.
    Fork(usize),
    /// A traversal died without a result.
    Dead,
    /// Success in match position: input exhausted, no open groups.
    Match(CaptureMap),
    /// Success behind the search sentinel with input exhausted.
    Search { extent: Extent, caps: CaptureMap },
    /// Success behind the sentinel with input left over; the executor
    /// may restart a traversal at `pos`.
    Partial {
        extent: Extent,
        caps: CaptureMap,
        pos: usize,
    },
    /// A generating traversal reached Success.
    Generated(String),
}

/// Run a compiled graph against `input` in match mode.
pub fn run_match<G: Graph>(graph: &G, input: &str, opts: &Options) -> Result<MatchResult, RunError> {
    let buffer = Arc::new(InputText::new(input));
    opts.validate_for_input(buffer.len())?;
    let mut exec = Executor::new(graph, buffer, opts.clone(), Mode::Match, rand::thread_rng());
    exec.run_parse()?;
    Ok(exec.assemble_match())
}

/// Run a sentinel-carrying graph against `input` in search mode.
pub(crate) fn run_search_on<G: Graph>(
    graph: &G,
    input: &str,
    opts: &Options,
) -> Result<SearchResult, RunError> {
    let buffer = Arc::new(InputText::new(input));
    opts.validate_for_input(buffer.len())?;
    let mut exec = Executor::new(graph, buffer, opts.clone(), Mode::Search, rand::thread_rng());
    exec.run_parse()?;
    Ok(exec.assemble_search())
}

/// Produce a random string the graph would match.
pub fn generate<G: Graph>(graph: &G, opts: &Options) -> Result<String, RunError> {
    generate_with_rng(graph, opts, rand::thread_rng())
}

/// [`generate`] with a caller-supplied RNG, for deterministic tests.
pub fn generate_with_rng<G: Graph, R: Rng>(
    graph: &G,
    opts: &Options,
    rng: R,
) -> Result<String, RunError> {
    if opts.timeout.is_zero() {
        return Err(trex_util::OptionError::ZeroTimeout.into());
    }
    let input = Arc::new(InputText::new(""));
    let mut exec = Executor::new(graph, input, opts.clone(), Mode::Match, rng);
    exec.run_generate()
}

struct Executor<'g, G: Graph, R: Rng> {
    graph: &'g G,
    input: Arc<InputText>,
    opts: Options,
    mode: Mode,
    deque: VecDeque<(NodeId, Traversal)>,
    tx: Sender<Event>,
    rx: Receiver<Event>,
    /// Live traversal count; the run ends when it reaches zero.
    active: usize,
    rng: R,
    /// Positions already seeded as search restarts; stops an
    /// empty-width match from restarting itself forever.
    restarts: FxHashSet<usize>,
    matches: Vec<CaptureMap>,
    searches: Vec<(Extent, CaptureMap)>,
}

impl<'g, G: Graph, R: Rng> Executor<'g, G, R> {
    fn new(graph: &'g G, input: Arc<InputText>, opts: Options, mode: Mode, rng: R) -> Self {
        let (tx, rx) = unbounded();
        Self {
            graph,
            input,
            opts,
            mode,
            deque: VecDeque::new(),
            tx,
            rx,
            active: 0,
            rng,
            restarts: FxHashSet::default(),
            matches: Vec::new(),
            searches: Vec::new(),
        }
    }

    fn emit(&self, event: Event) {
        // The receiver lives on self; the send cannot fail.
        let _ = self.tx.send(event);
    }

    /// Drive parse traversals until none remain (or a `one`-mode hit).
    fn run_parse(&mut self) -> Result<(), RunError> {
        let deadline = Instant::now() + self.opts.timeout;
        self.active = 1;
        self.restarts.insert(self.opts.offset);
        self.deque.push_back((
            self.graph.start(),
            Traversal::Parse(ParseState::at(self.opts.offset)),
        ));

        'sched: while self.active > 0 {
            if Instant::now() >= deadline {
                return Err(RunError::Timeout(self.opts.timeout));
            }
            let (id, trav) = self
                .deque
                .pop_front()
                .ok_or(RunError::Protocol("live traversals but nothing runnable"))?;
            self.step(id, trav)?;
            let events: Vec<Event> = self.rx.try_iter().collect();
            for event in events {
                if self.handle(event)? {
                    break 'sched;
                }
            }
        }
        Ok(())
    }

    /// Drive a single generating traversal to Success.
    fn run_generate(&mut self) -> Result<String, RunError> {
        let deadline = Instant::now() + self.opts.timeout;
        self.deque
            .push_back((self.graph.start(), Traversal::Gen(GenState::new())));
        loop {
            if Instant::now() >= deadline {
                return Err(RunError::Timeout(self.opts.timeout));
            }
            let (id, trav) = self
                .deque
                .pop_front()
                .ok_or(RunError::Protocol("generation stalled"))?;
            self.step(id, trav)?;
            let events: Vec<Event> = self.rx.try_iter().collect();
            for event in events {
                match event {
                    Event::Generated(out) => return Ok(out),
                    _ => return Err(RunError::Protocol("parse outcome in a generate run")),
                }
            }
        }
    }

    /// Apply one event to the accounting. `Ok(true)` means a
    /// `multiple=one` run has its result and should stop scheduling.
    fn handle(&mut self, event: Event) -> Result<bool, RunError> {
        match event {
            Event::Fork(delta) => {
                self.active += delta;
                Ok(false)
            }
            Event::Dead => {
                self.active -= 1;
                Ok(false)
            }
            Event::Match(caps) => {
                if self.mode != Mode::Match {
                    return Err(RunError::Protocol("match outcome in a search run"));
                }
                if !self.matches.contains(&caps) {
                    self.matches.push(caps);
                }
                self.active -= 1;
                Ok(self.opts.multiple == Multiple::One)
            }
            Event::Search { extent, caps } => {
                if self.mode != Mode::Search {
                    return Err(RunError::Protocol("search outcome in a match run"));
                }
                self.push_search(extent, caps);
                self.active -= 1;
                Ok(self.opts.multiple == Multiple::One)
            }
            Event::Partial { extent, caps, pos } => {
                if self.mode != Mode::Search {
                    return Err(RunError::Protocol("partial search outcome in a match run"));
                }
                self.push_search(extent, caps);
                if self.opts.multiple == Multiple::One {
                    self.active -= 1;
                    return Ok(true);
                }
                if self.restarts.insert(pos) {
                    // One traversal ended, a fresh one starts at the
                    // post-match position: the live count is unchanged.
                    self.deque
                        .push_back((self.graph.start(), Traversal::Parse(ParseState::at(pos))));
                } else {
                    self.active -= 1;
                }
                Ok(false)
            }
            Event::Generated(_) => Err(RunError::Protocol("generate outcome in a parse run")),
        }
    }

    /// Process one `(node, state)` pair.
    fn step(&mut self, id: NodeId, trav: Traversal) -> Result<(), RunError> {
        let graph = self.graph;
        match (graph.node(id), trav) {
            (Node::Start { next }, trav) => self.forward(*next, trav),

            (Node::Match { matcher, next }, Traversal::Parse(mut state)) => {
                match self.input.get(state.pos) {
                    Some(c) if matcher.accepts(c as u32) => {
                        if !matcher.peek {
                            state.pos += 1;
                        }
                        self.forward(*next, Traversal::Parse(state))
                    }
                    _ => {
                        self.emit(Event::Dead);
                        Ok(())
                    }
                }
            }
            (Node::Match { matcher, next }, Traversal::Gen(mut state)) => {
                if matcher.peek {
                    let standalone = matcher.standalone_set();
                    match state.acc.as_mut() {
                        Some(acc) => acc.union_in_place(&standalone),
                        None => {
                            return Err(RunError::Protocol("peek matcher outside a peek bracket"))
                        }
                    }
                } else {
                    let picked = if matcher.negated {
                        matcher.set.pick_neg(&mut self.rng)
                    } else {
                        matcher.set.pick(&mut self.rng)
                    };
                    if let Some(c) = picked.and_then(char::from_u32) {
                        state.out.push(c);
                    }
                }
                self.forward(*next, Traversal::Gen(state))
            }

            (Node::Split { outs }, Traversal::Parse(state)) => {
                if outs.is_empty() {
                    return Err(RunError::Protocol("split with no out-edges"));
                }
                // The fork notice must reach the executor before any
                // child can report back.
                if outs.len() > 1 {
                    self.emit(Event::Fork(outs.len() - 1));
                }
                let last = outs.len() - 1;
                for &out in &outs[..last] {
                    self.deque.push_back((out, Traversal::Parse(state.clone())));
                }
                self.deque.push_back((outs[last], Traversal::Parse(state)));
                Ok(())
            }
            (Node::Split { outs }, Traversal::Gen(state)) => {
                if outs.is_empty() {
                    return Err(RunError::Protocol("split with no out-edges"));
                }
                // No fan-out while generating: take one branch at random.
                let choice = self.rng.gen_range(0..outs.len());
                self.deque.push_back((outs[choice], Traversal::Gen(state)));
                Ok(())
            }

            (Node::BeginGroup { name, next }, Traversal::Parse(mut state)) => {
                state.stack.push((name.clone(), state.pos));
                for key in name.keys() {
                    state.caps.insert(key, Capture::NoCapture);
                }
                self.forward(*next, Traversal::Parse(state))
            }
            (Node::BeginGroup { next, .. }, trav @ Traversal::Gen(_)) => self.forward(*next, trav),

            (Node::EndGroup { next }, Traversal::Parse(mut state)) => {
                let (name, begin) = state
                    .stack
                    .pop()
                    .ok_or(RunError::Protocol("group closed with no open frame"))?;
                for key in name.keys() {
                    state.caps.insert(
                        key,
                        Capture::Span {
                            pos: begin,
                            len: state.pos - begin,
                        },
                    );
                }
                self.forward(*next, Traversal::Parse(state))
            }
            (Node::EndGroup { next }, trav @ Traversal::Gen(_)) => self.forward(*next, trav),

            (Node::BeginPeek { next }, trav @ Traversal::Parse(_)) => self.forward(*next, trav),
            (Node::BeginPeek { next }, Traversal::Gen(mut state)) => {
                state.acc = Some(Uniset::none());
                self.forward(*next, Traversal::Gen(state))
            }

            (Node::EndPeek { next }, Traversal::Parse(mut state)) => {
                // Every member peeked at this code point and passed;
                // consume it exactly once.
                state.pos += 1;
                self.forward(*next, Traversal::Parse(state))
            }
            (Node::EndPeek { next }, Traversal::Gen(mut state)) => {
                let acc = state
                    .acc
                    .take()
                    .ok_or(RunError::Protocol("peek bracket closed while not open"))?;
                if let Some(c) = acc.complement().pick(&mut self.rng).and_then(char::from_u32) {
                    state.out.push(c);
                }
                self.forward(*next, Traversal::Gen(state))
            }

            (Node::Success, Traversal::Parse(state)) => self.success(state),
            (Node::Success, Traversal::Gen(state)) => {
                self.emit(Event::Generated(state.out));
                Ok(())
            }
        }
    }

    fn forward(&mut self, next: Option<NodeId>, trav: Traversal) -> Result<(), RunError> {
        let target = next.ok_or(RunError::Protocol("unattached node port"))?;
        self.deque.push_back((target, trav));
        Ok(())
    }

    /// Terminal logic: what a traversal means when it reaches Success.
    fn success(&mut self, state: ParseState) -> Result<(), RunError> {
        let consumed_all = state.pos >= self.input.len();
        match state.stack.as_slice() {
            [] => {
                if consumed_all {
                    let caps = self.backfill(state.caps);
                    self.emit(Event::Match(caps));
                } else {
                    self.emit(Event::Dead);
                }
                Ok(())
            }
            [(GroupName::Search, begin)] => {
                let begin = *begin;
                let extent = Extent::new(begin, state.pos - begin);
                let mut caps = state.caps;
                caps.shift_remove(&CaptureKey::Search);
                let caps = self.backfill(caps);
                if consumed_all {
                    self.emit(Event::Search { extent, caps });
                } else {
                    self.emit(Event::Partial {
                        extent,
                        caps,
                        pos: state.pos,
                    });
                }
                Ok(())
            }
            _ => Err(RunError::Protocol("open groups at success")),
        }
    }

    /// Guarantee a value under every declared capture key.
    fn backfill(&self, mut caps: CaptureMap) -> CaptureMap {
        for key in &self.graph.meta().keys {
            caps.entry(key.clone()).or_insert(Capture::NoCapture);
        }
        caps
    }

    fn push_search(&mut self, extent: Extent, caps: CaptureMap) {
        if !self
            .searches
            .iter()
            .any(|(e, c)| *e == extent && *c == caps)
        {
            self.searches.push((extent, caps));
        }
    }

    fn assemble_match(&self) -> MatchResult {
        match self.opts.multiple {
            Multiple::One => match self.matches.first() {
                Some(caps) => MatchResult::Match(self.values(caps)),
                None => MatchResult::NoMatch(self.echo()),
            },
            Multiple::All => {
                if self.matches.is_empty() {
                    MatchResult::NoMatch(self.echo())
                } else {
                    MatchResult::Matches(self.matches.iter().map(|c| self.values(c)).collect())
                }
            }
        }
    }

    fn assemble_search(&mut self) -> SearchResult {
        match self.opts.multiple {
            Multiple::One => match self.searches.first() {
                Some((extent, caps)) => SearchResult::Search(*extent, self.values(caps)),
                None => SearchResult::NoMatch(self.echo()),
            },
            Multiple::All => {
                if self.searches.is_empty() {
                    SearchResult::NoMatch(self.echo())
                } else {
                    self.searches.sort_by_key(|(extent, _)| *extent);
                    SearchResult::Searches(
                        self.searches
                            .iter()
                            .map(|(extent, caps)| (*extent, self.values(caps)))
                            .collect(),
                    )
                }
            }
        }
    }

    /// Convert traversal captures to the requested payload form,
    /// applying the compiled and runtime capture filters. Key 0 always
    /// carries the whole input string.
    fn values(&self, caps: &CaptureMap) -> CaptureValues {
        let meta = self.graph.meta();
        let mut out = CaptureValues::default();
        out.insert(
            CaptureKey::Index(0),
            CaptureValue::Text(self.input.as_str().to_string()),
        );
        for (key, cap) in caps {
            if *key == CaptureKey::Index(0) || *key == CaptureKey::Search {
                continue;
            }
            if !meta.capture.admits(key) || !self.opts.capture.admits(key) {
                continue;
            }
            let value = match cap {
                Capture::NoCapture => CaptureValue::NoCapture,
                Capture::Span { pos, len } => match self.opts.return_form {
                    ReturnForm::Index => CaptureValue::Index {
                        pos: *pos,
                        len: *len,
                    },
                    ReturnForm::Binary => CaptureValue::Text(self.input.slice(*pos, *len)),
                },
            };
            out.insert(key.clone(), value);
        }
        out
    }

    /// The no-match record: key 0 echoes the input.
    fn echo(&self) -> CaptureValues {
        let mut out = CaptureValues::default();
        out.insert(
            CaptureKey::Index(0),
            CaptureValue::Text(self.input.as_str().to_string()),
        );
        out
    }
}
