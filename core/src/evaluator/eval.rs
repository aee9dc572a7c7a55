//! Core walk, shared by the prepass and evaluation.

use tracing::debug;

use crate::{
    casting::{as_boolean, as_integer, as_multi_period_value, as_multi_value, as_number, as_text, compare, to_text},
    dimensions::{EvalContext, OrgUnitDimension, Period},
    evaluator::{
        EvalError, NodeKind, Resolver, StructuralError,
        operators::{eval_arithmetic, eval_ordering},
    },
    parser::{Expr, Function, Literal, Operator},
    range::Range,
    scope_stack::{ItemScopes, Scope, ScopeStack},
    stdlib::aggregate,
    values::{MultiPeriodValue, MultiValue, Value},
};

/// How much of the tree a walk visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prepass. Every operand and branch is visited, including those
    /// evaluation would skip, and dimension functions walk their
    /// sub-expression once.
    Check,
    /// Real evaluation. Logical operators, `if`, `except` and `coalesce`
    /// short-circuit, and dimension functions iterate every member.
    Evaluate,
}

/// Tree walker over a parsed expression.
///
/// Carries per-walk state (scope stack, depth, collected item scopes), so
/// one walker serves exactly one expression walk.
pub struct Walker<'r, R: Resolver + ?Sized> {
    mode: Mode,
    resolver: &'r R,
    scopes: ScopeStack,
    item_scopes: ItemScopes,
    depth: usize,
    max_depth: usize,
}

impl<'r, R: Resolver + ?Sized> Walker<'r, R> {
    pub fn new(mode: Mode, resolver: &'r R, max_depth: usize) -> Self {
        Self {
            mode,
            resolver,
            scopes: ScopeStack::new(),
            item_scopes: ItemScopes::new(),
            depth: 0,
            max_depth,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of dimensional frames currently pushed.
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// The data items seen so far, with the frames they were seen under.
    pub fn into_item_scopes(self) -> ItemScopes {
        self.item_scopes
    }

    /// Walk an expression node.
    pub fn walk(&mut self, expr: &Expr, ctx: &EvalContext) -> Result<Value, EvalError> {
        // Check depth before recursing
        if self.depth >= self.max_depth {
            return Err(EvalError::StackOverflow {
                depth: self.depth,
                max_depth: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.walk_inner(expr, ctx);
        self.depth -= 1;

        result
    }

    /// Inner walk logic (no depth tracking).
    fn walk_inner(&mut self, expr: &Expr, ctx: &EvalContext) -> Result<Value, EvalError> {
        match expr {
            Expr::Literal(Literal::Number(n)) => Ok(Value::Number(*n)),
            Expr::Literal(Literal::Text(s)) => Ok(Value::Text(s.clone())),
            Expr::Literal(Literal::Bool(b)) => Ok(Value::Boolean(*b)),
            Expr::DimensionItem(item) => Ok(self.item(item, ctx)),
            Expr::Constant(uid) => Ok(self.resolver.constant(uid)),
            Expr::OrgUnitCount(uid) => Ok(self.resolver.org_unit_count(uid, ctx)),
            Expr::ReportingRate(uid) => Ok(self.resolver.reporting_rate(uid, ctx)),
            Expr::Days => Ok(self.resolver.days(ctx)),
            Expr::Unary { op, expr } => self.unary(*op, expr, ctx),
            Expr::Binary { op, left, right } => self.binary(*op, left, right, ctx),
            Expr::Call { function, args } => self.call(*function, args, ctx),
        }
    }

    fn item(&mut self, item: &str, ctx: &EvalContext) -> Value {
        let scope = self.scopes.current().cloned().unwrap_or_default();
        self.item_scopes.insert(item, scope);

        if self.mode == Mode::Evaluate && !self.scopes.is_empty() {
            debug!(
                item,
                scope = %self.scopes,
                period = %ctx.period,
                org_unit = %ctx.org_unit,
                "evaluating item in scope"
            );
        }
        self.resolver.item(item, ctx)
    }

    /// Push `scope`, run `f`, and pop the frame again whether or not `f`
    /// succeeded.
    fn with_scope<T>(
        &mut self,
        scope: Scope,
        f: impl FnOnce(&mut Self) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        debug!(scope = %scope, depth = self.scopes.depth() + 1, mode = ?self.mode, "push scope");
        self.scopes.push(scope);
        let result = f(self);
        let popped = self.scopes.pop();
        debug_assert!(popped.is_ok(), "scope stack underflow");
        result
    }

    fn integer(&mut self, expr: &Expr, ctx: &EvalContext) -> Result<i32, EvalError> {
        let value = self.walk(expr, ctx)?;
        Ok(as_integer(&value)?)
    }

    fn integers(&mut self, exprs: &[Expr], ctx: &EvalContext) -> Result<Vec<i32>, EvalError> {
        exprs.iter().map(|expr| self.integer(expr, ctx)).collect()
    }

    fn text(&mut self, expr: &Expr, ctx: &EvalContext) -> Result<String, EvalError> {
        let value = self.walk(expr, ctx)?;
        Ok(as_text(&value)?.to_string())
    }

    fn boolean(&mut self, expr: &Expr, ctx: &EvalContext) -> Result<bool, EvalError> {
        let value = self.walk(expr, ctx)?;
        Ok(as_boolean(&value)?)
    }

    fn number(&mut self, expr: &Expr, ctx: &EvalContext) -> Result<f64, EvalError> {
        let value = self.walk(expr, ctx)?;
        Ok(as_number(&value)?)
    }

    /// `from[, to]` range arguments, both optional.
    fn range(&mut self, exprs: &[Expr], ctx: &EvalContext) -> Result<Range, EvalError> {
        let bounds = self.integers(exprs, ctx)?;
        Ok(Range::from_bounds(bounds.first().copied(), bounds.get(1).copied()))
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn unary(&mut self, op: Operator, operand: &Expr, ctx: &EvalContext) -> Result<Value, EvalError> {
        match op {
            Operator::Sub => Ok(Value::Number(-self.number(operand, ctx)?)),
            Operator::Add => Ok(Value::Number(self.number(operand, ctx)?)),
            Operator::Not => Ok(Value::Boolean(!self.boolean(operand, ctx)?)),
            _ => Err(EvalError::InvalidOperator {
                op,
                node: NodeKind::Unary,
            }),
        }
    }

    fn binary(
        &mut self,
        op: Operator,
        left: &Expr,
        right: &Expr,
        ctx: &EvalContext,
    ) -> Result<Value, EvalError> {
        let invalid = EvalError::InvalidOperator {
            op,
            node: NodeKind::Binary,
        };
        match op {
            Operator::And | Operator::Or => return self.logical(op, left, right, ctx),
            Operator::Not => return Err(invalid),
            _ => {}
        }

        let left = self.walk(left, ctx)?;
        let right = self.walk(right, ctx)?;

        match op {
            // String concatenation or numeric addition
            Operator::Add if matches!(left, Value::Text(_)) => {
                let mut text = as_text(&left)?.to_string();
                text.push_str(&to_text(&right)?);
                Ok(Value::Text(text))
            }
            Operator::Eq => Ok(Value::Boolean(left == right)),
            Operator::Ne => Ok(Value::Boolean(left != right)),
            Operator::Lt | Operator::Le | Operator::Gt | Operator::Ge => {
                let ordering = compare(&left, &right)?;
                eval_ordering(op, ordering)
                    .map(Value::Boolean)
                    .ok_or(invalid)
            }
            _ => {
                let (l, r) = (as_number(&left)?, as_number(&right)?);
                eval_arithmetic(op, l, r).map(Value::Number).ok_or(invalid)
            }
        }
    }

    fn logical(
        &mut self,
        op: Operator,
        left: &Expr,
        right: &Expr,
        ctx: &EvalContext,
    ) -> Result<Value, EvalError> {
        let l = self.boolean(left, ctx)?;

        // `false && _` and `true || _` are decided by the left side.
        let decided = if op == Operator::And { !l } else { l };
        if decided && self.mode == Mode::Evaluate {
            return Ok(Value::Boolean(l));
        }

        let r = self.boolean(right, ctx)?;
        Ok(Value::Boolean(if op == Operator::And { l && r } else { l || r }))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn call(&mut self, function: Function, args: &[Expr], ctx: &EvalContext) -> Result<Value, EvalError> {
        let expected = function.arity();
        if !expected.accepts(args.len()) {
            return Err(StructuralError {
                function,
                expected,
                found: args.len(),
            }
            .into());
        }

        match function {
            // Logical functions
            Function::If => self.conditional(args, ctx),
            Function::Except => self.except(args, ctx),
            Function::IsNull => Ok(Value::Boolean(self.walk(&args[0], ctx)?.is_null())),
            Function::Coalesce => self.coalesce(args, ctx),

            // Aggregation functions
            Function::Sum
            | Function::Max
            | Function::Min
            | Function::Average
            | Function::StdDev
            | Function::Variance
            | Function::Median
            | Function::Count
            | Function::Percentile
            | Function::RankHigh
            | Function::RankLow
            | Function::PercentileHigh
            | Function::PercentileLow => self.aggregate(function, args, ctx),
            Function::Last => self.last(args, ctx),

            // Aggregation scope functions
            Function::Period => self.period(args, ctx),
            Function::OuLevel => self.org_unit(OrgUnitDimension::Level, args, ctx),
            Function::OuAncestor => self.org_unit(OrgUnitDimension::Ancestor, args, ctx),
            Function::OuDescendant => self.org_unit(OrgUnitDimension::Descendant, args, ctx),
            Function::OuPeer => self.org_unit(OrgUnitDimension::Peer, args, ctx),
            Function::OuGroup => self.org_unit(OrgUnitDimension::Group, args, ctx),
        }
    }

    /// `if(test, then, else)`
    fn conditional(&mut self, args: &[Expr], ctx: &EvalContext) -> Result<Value, EvalError> {
        let test = self.boolean(&args[0], ctx)?;
        match self.mode {
            Mode::Evaluate => self.walk(if test { &args[1] } else { &args[2] }, ctx),
            Mode::Check => {
                let then = self.walk(&args[1], ctx)?;
                let otherwise = self.walk(&args[2], ctx)?;
                Ok(if test { then } else { otherwise })
            }
        }
    }

    /// `except(expr, cond)`: `Null` when `cond` holds.
    ///
    /// The prepass always yields `expr`'s value as a type witness.
    fn except(&mut self, args: &[Expr], ctx: &EvalContext) -> Result<Value, EvalError> {
        let excluded = self.boolean(&args[1], ctx)?;
        match self.mode {
            Mode::Evaluate if excluded => Ok(Value::Null),
            _ => self.walk(&args[0], ctx),
        }
    }

    /// First non-`Null` argument.
    fn coalesce(&mut self, args: &[Expr], ctx: &EvalContext) -> Result<Value, EvalError> {
        let mut result = Value::Null;
        for arg in args {
            let value = self.walk(arg, ctx)?;
            if result.is_null() && !value.is_null() {
                result = value;
                if self.mode == Mode::Evaluate {
                    break;
                }
            }
        }
        Ok(result)
    }

    fn aggregate(&mut self, function: Function, args: &[Expr], ctx: &EvalContext) -> Result<Value, EvalError> {
        let collected = as_multi_value(&self.walk(&args[0], ctx)?)?;
        if function == Function::Count {
            return Ok(Value::Number(collected.len() as f64));
        }

        let numbers = collected
            .iter()
            .map(as_number)
            .collect::<Result<Vec<f64>, _>>()?;

        let result = match function {
            Function::Sum => aggregate::sum(&numbers),
            Function::Max => aggregate::max(&numbers),
            Function::Min => aggregate::min(&numbers),
            Function::Average => aggregate::average(&numbers),
            Function::StdDev => aggregate::stddev(&numbers),
            Function::Variance => aggregate::variance(&numbers),
            Function::Median => aggregate::median(&numbers),
            Function::Percentile => {
                let p = self.number(&args[1], ctx)?;
                aggregate::percentile(&numbers, p).map_err(|err| EvalError::InvalidArgument {
                    function,
                    message: err.to_string(),
                })?
            }
            Function::RankHigh | Function::RankLow | Function::PercentileHigh | Function::PercentileLow => {
                let x = self.number(&args[1], ctx)?;
                let rank = match function {
                    Function::RankHigh | Function::PercentileHigh => aggregate::rank_high(&numbers, x),
                    _ => aggregate::rank_low(&numbers, x),
                };
                match function {
                    Function::RankHigh | Function::RankLow => rank as f64,
                    _ => aggregate::percentile_rank(rank, numbers.len()),
                }
            }
            _ => unreachable!("{} is not an aggregation", function),
        };
        Ok(Value::Number(result))
    }

    /// `last(x)` is the most recent value of a period-tagged collection;
    /// `last(x, n)` keeps the `n` most recent.
    fn last(&mut self, args: &[Expr], ctx: &EvalContext) -> Result<Value, EvalError> {
        let value = self.walk(&args[0], ctx)?;
        let empty = MultiPeriodValue::new();
        let by_period = match &value {
            Value::Null => &empty,
            other => as_multi_period_value(other)?,
        };

        let Some(limit) = args.get(1) else {
            return Ok(by_period.most_recent().cloned().unwrap_or(Value::Null));
        };
        let limit = self.integer(limit, ctx)?;
        let limit = usize::try_from(limit).map_err(|_| EvalError::InvalidArgument {
            function: Function::Last,
            message: format!("count must not be negative, found {}", limit),
        })?;
        Ok(Value::MultiPeriod(by_period.last(limit)))
    }

    /// `period(x, from[, to[, yearFrom[, yearTo]]]...)`
    ///
    /// One shift yields one value. Otherwise the shifts are read in blocks
    /// of four, each pushing its own frame, and every (year, period)
    /// combination is collected with its period tag.
    fn period(&mut self, args: &[Expr], ctx: &EvalContext) -> Result<Value, EvalError> {
        let subject = &args[0];
        let shifts = self.integers(&args[1..], ctx)?;

        if let [shift] = shifts[..] {
            let scope = Scope::new().with_periods(Range::single(shift));
            let shifted = ctx.with_period(shifted_period(ctx, shift, 0)?);
            return self.with_scope(scope, |w| w.walk(subject, &shifted));
        }

        let mut collected = MultiPeriodValue::new();
        for block in shifts.chunks(4) {
            let periods = Range::from_bounds(Some(block[0]), block.get(1).copied());
            let mut scope = Scope::new().with_periods(periods);
            let years = match block.get(2) {
                Some(&from) => {
                    let years = Range::from_bounds(Some(from), block.get(3).copied());
                    scope = scope.with_years(years);
                    years
                }
                None => Range::single(0),
            };

            let combinations: Vec<(i32, i32)> = match self.mode {
                Mode::Check => vec![(block[0], years.from.unwrap_or(0))],
                Mode::Evaluate => years
                    .values()
                    .flat_map(|year| periods.values().map(move |shift| (shift, year)))
                    .collect(),
            };

            self.with_scope(scope, |w| {
                for (shift, year) in combinations {
                    let period = shifted_period(ctx, shift, year)?;
                    let value = w.walk(subject, &ctx.with_period(period))?;
                    collected.add_period_value(value, period);
                }
                Ok(())
            })?;
        }
        Ok(Value::MultiPeriod(collected))
    }

    /// `ouLevel`, `ouAncestor`, `ouDescendant`, `ouPeer` and `ouGroup`.
    ///
    /// Walks the subject once per member org unit. A single ancestor level
    /// yields one value.
    fn org_unit(
        &mut self,
        dimension: OrgUnitDimension,
        args: &[Expr],
        ctx: &EvalContext,
    ) -> Result<Value, EvalError> {
        let subject = &args[0];
        let rest = &args[1..];
        let scope = match dimension {
            OrgUnitDimension::Level => Scope::new().with_org_unit_levels(self.range(rest, ctx)?),
            OrgUnitDimension::Ancestor => Scope::new()
                .with_org_unit_levels(self.range(rest, ctx)?.relative_to(ctx.org_unit_level, -1)),
            OrgUnitDimension::Descendant => Scope::new()
                .with_org_unit_levels(self.range(rest, ctx)?.relative_to(ctx.org_unit_level, 1)),
            OrgUnitDimension::Peer => {
                Scope::new().with_org_unit_peers(self.range(rest, ctx)?.with_default_from(1))
            }
            OrgUnitDimension::Group => {
                let groups = rest
                    .iter()
                    .map(|arg| self.text(arg, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Scope::new().with_org_unit_groups(groups)
            }
        };

        let members = self.resolver.org_units(dimension, &scope, ctx);
        let single = dimension == OrgUnitDimension::Ancestor
            && scope.org_unit_levels.is_some_and(|levels| levels.is_single());

        self.with_scope(scope, |w| {
            if single {
                return match members.first() {
                    Some(member) => w.walk(subject, &ctx.with_org_unit(member)),
                    None => Ok(Value::Null),
                };
            }

            let mut values = Vec::with_capacity(members.len());
            match w.mode {
                Mode::Check => {
                    let member_ctx = match members.first() {
                        Some(member) => ctx.with_org_unit(member),
                        None => ctx.clone(),
                    };
                    values.push(w.walk(subject, &member_ctx)?);
                }
                Mode::Evaluate => {
                    for member in &members {
                        values.push(w.walk(subject, &ctx.with_org_unit(member))?);
                    }
                }
            }
            collect_members(values, yields_periods(subject))
        })
    }
}

/// Collects per-member results. A period-tagged subject keeps its tags,
/// even when no member contributes a value.
fn collect_members(values: Vec<Value>, by_period: bool) -> Result<Value, EvalError> {
    if !by_period {
        return Ok(Value::Multi(values.into_iter().collect::<MultiValue>()));
    }
    let mut collected = MultiPeriodValue::new();
    for value in values {
        if !value.is_null() {
            collected.append(as_multi_period_value(&value)?.clone());
        }
    }
    Ok(Value::MultiPeriod(collected))
}

/// Whether `expr` always yields a period-tagged collection or `Null`,
/// whatever the data.
fn yields_periods(expr: &Expr) -> bool {
    let Expr::Call { function, args } = expr else {
        return false;
    };
    match function {
        Function::Period => args.len() > 2,
        Function::Last => args.len() == 2,
        Function::Except
        | Function::OuLevel
        | Function::OuAncestor
        | Function::OuDescendant
        | Function::OuPeer
        | Function::OuGroup => yields_periods(&args[0]),
        Function::If => yields_periods(&args[1]) && yields_periods(&args[2]),
        Function::Coalesce => args.iter().all(yields_periods),
        _ => false,
    }
}

fn shifted_period(ctx: &EvalContext, periods: i32, years: i32) -> Result<Period, EvalError> {
    ctx.period
        .shift(periods, years)
        .ok_or_else(|| EvalError::InvalidArgument {
            function: Function::Period,
            message: format!(
                "shifting {} by {} periods and {} years leaves the representable range",
                ctx.period, periods, years
            ),
        })
}
