//! Canned response templates
//!
//! Static text returned by the classifier. Only the greeting is
//! parameterized; everything else is fixed regardless of the utterance.

/// Seeded greeting for a fresh conversation.
pub fn greeting(username: &str) -> String {
    format!(
        "Hello {username}! I'm your BRD Assistant, specialized in helping you with Business Requirements Document analysis, improvements, and code generation. \n\nI can help you with:\n• Analyzing and improving BRD documents\n• Generating technical specifications\n• Writing code based on requirements\n• Reviewing and optimizing existing requirements\n• Creating user stories and acceptance criteria\n\nHow can I assist you today?"
    )
}

/// Code-sample response. The fenced block is stripped before the text is
/// stored; the fence is what marks the reply as code.
pub const CODE_SAMPLE: &str = r#"I can help you generate code based on your requirements. Here's a sample implementation:

```javascript
// Example: User Authentication Function
function authenticateUser(username, password) {
  // Validate input parameters
  if (!username || !password) {
    throw new Error('Username and password are required');
  }

  // Simulate API call
  return new Promise((resolve, reject) => {
    setTimeout(() => {
      if (username.length >= 3 && password.length >= 6) {
        resolve({
          success: true,
          user: { username, id: Date.now() },
          token: 'jwt-token-here'
        });
      } else {
        reject(new Error('Invalid credentials'));
      }
    }, 1000);
  });
}
```

Would you like me to modify this code or generate something specific for your requirements?"#;

/// BRD structure guidance.
pub const BRD_GUIDANCE: &str = "Great! Let me help you with your Business Requirements Document. Here are the key areas I can assist with:\n\n**BRD Structure & Components:**\n• Executive Summary & Business Objectives\n• Functional & Non-functional Requirements\n• User Stories & Acceptance Criteria\n• Technical Specifications & Constraints\n• Risk Assessment & Mitigation Strategies\n\n**BRD Best Practices:**\n• Clear, measurable requirements\n• Stakeholder identification and sign-off\n• Traceability matrix implementation\n• Change management procedures\n\nWhat specific aspect of your BRD would you like to focus on? Please share your current requirements or challenges.";

/// Improvement checklist.
pub const IMPROVEMENT_CHECKLIST: &str = "I'd be happy to help improve your requirements! For effective BRD optimization, I recommend:\n\n**Quality Checklist:**\n✓ Requirements are specific, measurable, and testable\n✓ Business value is clearly articulated\n✓ Dependencies and constraints are identified\n✓ Acceptance criteria are well-defined\n✓ Stakeholder roles and responsibilities are clear\n\n**Common Improvements:**\n• Add priority levels (Must-have, Should-have, Could-have)\n• Include user persona definitions\n• Specify performance and scalability requirements\n• Add security and compliance requirements\n• Define data management and migration needs\n\nPlease share your current requirements document or specific sections you'd like me to review and improve.";

/// Fallback when no rule matches.
pub const FALLBACK: &str = "Thank you for your message! As your BRD Assistant, I'm here to help with:\n\n• **Requirements Analysis**: Review and improve existing BRDs\n• **Code Generation**: Transform requirements into functional code\n• **Documentation**: Create comprehensive technical specifications\n• **Best Practices**: Apply industry standards to your requirements\n\nCould you please provide more details about your specific needs? For example:\n- Do you have an existing BRD to review?\n- Are you starting a new project and need requirements gathering?\n- Do you need help translating requirements into technical specifications?\n\nThe more context you provide, the better I can assist you!";
