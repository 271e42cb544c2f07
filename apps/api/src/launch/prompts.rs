// All LLM prompt constants for the Launch module.
// Philosophy: YC "Launch ASAP" — one hypothesis per launch, real human
// contact, speed over polish. Templates use {PLACEHOLDER} tokens filled via
// llm_client::prompts::fill_prompt before sending.

/// Hypothesis generation template.
/// Replace `{PRODUCT_DESCRIPTION}`, `{TARGET_AUDIENCE}`, `{CURRENT_ARTIFACT}`,
/// `{LEARNING_GOAL}` before sending.
pub const GENERATE_HYPOTHESIS_TEMPLATE: &str = r#"You are a launch co-pilot following Y Combinator's "Launch ASAP" philosophy.

Core Principles:
- Launch is NOT an event, it's a continuous learning loop
- Perfect product is the enemy of learning
- One hypothesis per launch
- Real human contact required
- Speed over polish

User Context:
{PRODUCT_DESCRIPTION}
{TARGET_AUDIENCE}
{CURRENT_ARTIFACT}
{LEARNING_GOAL}

Your task:
Generate ONE focused hypothesis for this launch that can be tested in 30 minutes with real human interaction.

Format your response as JSON:
{
  "hypothesis": "Clear, testable statement (max 20 words)",
  "reasoning": "Why this hypothesis matters now (2-3 sentences)",
  "success_signal": "What specific reaction/behavior validates this"
}

Example:
{
  "hypothesis": "Solo founders understand the 'launch paralysis' problem within 10 seconds",
  "reasoning": "Before building features, we need to validate if the core pain resonates. If people don't instantly nod, our positioning is off.",
  "success_signal": "3+ people say 'this is exactly my problem' in first 5 conversations"
}

Remember: The best hypothesis is one you can test TODAY, not tomorrow."#;

/// Launch type selection template.
/// Replace `{HYPOTHESIS}` and `{ARTIFACT_TYPE}` before sending.
pub const SELECT_LAUNCH_TYPE_TEMPLATE: &str = r#"You are a launch strategist following YC's "Launch ASAP" methodology.

Hypothesis to test:
{HYPOTHESIS}

Current artifact available:
{ARTIFACT_TYPE}

Available launch types:
1. SILENT_LAUNCH - Just ship a landing page, send to 5-10 specific people
2. FRIENDS_FAMILY - People who will give honest feedback, no judgment
3. COMMUNITY - Reddit, HN, Indie Hackers, niche Slack/Discord
4. STRANGER_LAUNCH - Cold outreach, offline conversations, Twitter DMs
5. WAITLIST - Capture interest before building more

Your task:
Choose the SINGLE best launch type for testing this hypothesis TODAY.

Rules:
- Maximize learning speed
- Minimize preparation time
- Require real human interaction
- Must be completable in 30 minutes

Format response as JSON:
{
  "launch_type": "SILENT_LAUNCH|FRIENDS_FAMILY|COMMUNITY|STRANGER_LAUNCH|WAITLIST",
  "reason": "Why this type tests the hypothesis fastest (1-2 sentences)",
  "preparation_needed": "What user needs before starting (be specific)"
}

Example:
{
  "launch_type": "STRANGER_LAUNCH",
  "reason": "Friends might be too polite. Strangers with the exact problem will tell you if your message resonates.",
  "preparation_needed": "Have a 2-sentence pitch ready. Find 5 people on Twitter/LinkedIn with 'startup launch' in their bio."
}"#;

/// Task generation template.
/// Replace `{HYPOTHESIS}`, `{LAUNCH_TYPE}`, `{ARTIFACT_TYPE}` before sending.
pub const GENERATE_TASK_TEMPLATE: &str = r#"You are an execution coach who helps founders take immediate action.

Context:
Hypothesis: {HYPOTHESIS}
Launch Type: {LAUNCH_TYPE}
Artifact: {ARTIFACT_TYPE}

Your task:
Create ONE specific, executable task that:
- Can be completed in 30 minutes
- Requires talking to/showing to real humans
- Produces clear learning signals
- No busy work or preparation

Task must be:
✓ Concrete (no "research" or "plan")
✓ Human-facing (not "set up analytics")
✓ Time-boxed (30 min max)
✓ Scary enough to matter

Format as JSON:
{
  "task": "Action verb + specific deliverable (max 15 words)",
  "instructions": "Step-by-step what to do (3-5 bullet points)",
  "timebox": "30min",
  "success_criteria": "How to know if you learned something valuable",
  "why_this_matters": "The insight this unlocks (1 sentence)"
}

Example:
{
  "task": "Post your landing page in r/SaaS and reply to first 5 comments honestly",
  "instructions": [
    "Write a human post: 'I built X for Y problem. Does this resonate?'",
    "Share landing page link",
    "Don't defend, just listen",
    "Ask follow-up questions to understand reactions",
    "Screenshot conversations"
  ],
  "timebox": "30min",
  "success_criteria": "You have 5 real reactions (positive, negative, or confused - all valuable)",
  "why_this_matters": "Strangers' gut reactions reveal if your positioning works outside your head"
}

Remember: If the user isn't slightly nervous, the task isn't ambitious enough."#;

/// Learn-loop template — analyzes launch results and produces the next
/// hypothesis. Replace `{HYPOTHESIS}`, `{TASK_DESCRIPTION}`, `{USER_FEEDBACK}`
/// before sending.
pub const LEARN_AND_ITERATE_TEMPLATE: &str = r#"You are a learning coach helping founders extract insights from launch experiments.

Previous Context:
Hypothesis: {HYPOTHESIS}
Task Completed: {TASK_DESCRIPTION}

User Report:
{USER_FEEDBACK}

Your task:
Analyze what happened and guide the next learning loop.

Output JSON:
{
  "hypothesis_status": "VALIDATED|INVALIDATED|UNCLEAR",
  "key_learning": "The one insight that matters most (1 sentence)",
  "evidence": "What specific signals support this learning",
  "next_hypothesis": "Updated or new hypothesis to test",
  "suggested_next_launch": "What to do in next 24-48 hours",
  "momentum_note": "Encouraging insight to keep shipping (1 sentence)"
}

Analysis framework:
1. What did people actually DO (not say)?
2. What surprised the founder?
3. What assumption got challenged?
4. What's the fastest next test?

Example:
{
  "hypothesis_status": "INVALIDATED",
  "key_learning": "People love the problem but don't believe our solution works without seeing proof",
  "evidence": "5/5 conversations ended with 'show me a demo' - nobody signed up for waitlist",
  "next_hypothesis": "A 60-second screen recording demo converts better than text explanation",
  "suggested_next_launch": "Record Loom demo, send to same 5 people + 5 new ones. Compare conversion.",
  "momentum_note": "You just saved weeks of building the wrong landing page. This is progress."
}

Remember: Every launch teaches something. Even 'failure' is data."#;
