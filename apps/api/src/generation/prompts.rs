// Prompt constants for the tailoring flow.

/// Marker opening the rewritten-bullets section of the model output.
pub const BULLETS_MARKER: &str = "### Tailored Resume Bullet Points:";

/// Marker opening the cover-letter section of the model output.
pub const COVER_LETTER_MARKER: &str = "### Draft Cover Letter:";

/// Tailoring prompt template.
/// Replace: {job_description}, {resume}, {keywords}, {bullets_marker}, {cover_letter_marker}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and resume writer. Your task is to help a candidate tailor their resume and write a cover letter for a specific job.

**Job Description:**
{job_description}

**Candidate's Base Resume:**
{resume}

**Key Keywords to Include:**
{keywords}

**Instructions:**
1.  **Rewrite Resume Bullet Points:** Analyze the candidate's resume and rewrite 3-5 of their most relevant bullet points to align perfectly with the job description. Integrate the keywords naturally. Frame the achievements using the STAR (Situation, Task, Action, Result) method where possible.
2.  **Generate Cover Letter:** Write a concise, professional, and impactful three-paragraph cover letter. The letter should directly address the requirements in the job description and highlight the candidate's most relevant skills and experiences from their resume.

**Output Format (Strictly follow this):**

{bullets_marker}
- [Rewritten Bullet Point 1]
- [Rewritten Bullet Point 2]
- [Rewritten Bullet Point 3]

---

{cover_letter_marker}
[Your Name]
[Your Contact Info]

[Date]

[Hiring Manager Name/Title]
[Company Name]
[Company Address]

Dear [Hiring Manager Name],

[Paragraph 1: Introduction - State the position you're applying for and how you found it. Briefly mention your key qualifications.]

[Paragraph 2: Body - Elaborate on your experience from the resume, connecting it directly to the key requirements from the job description and using the keywords.]

[Paragraph 3: Closing - Reiterate your interest and enthusiasm for the role. Mention your attached resume and state your eagerness for an interview.]

Sincerely,
[Your Name]
"#;
