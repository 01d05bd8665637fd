//! Schema and query fixtures.

/// A blog schema with a Relay-style paginated `posts` connection and a
/// `Post` type wide enough to exceed the default field threshold.
pub const BLOG_SCHEMA: &str = r"
type Query {
  posts(first: Int, after: String, last: Int, before: String): PostConnection!
  post(id: ID!): Post
  viewer: User
  tags: [String!]!
  search(term: String!): [SearchResult!]!
}

type Mutation {
  publishPost(id: ID!): Post
}

type PostConnection {
  nodes: [Post!]!
  edges: [PostEdge!]!
  pageInfo: PageInfo!
}

type PostEdge {
  cursor: String!
  node: Post!
}

type PageInfo {
  hasNextPage: Boolean!
  endCursor: String
}

type Post implements Node {
  id: ID!
  title: String!
  slug: String!
  excerpt: String
  body: String
  status: PostStatus!
  createdAt: String!
  updatedAt: String
  publishedAt: String
  viewCount: Int!
  likeCount: Int!
  commentCount: Int!
  readingTime: Int
  featured: Boolean!
  language: String
  canonicalUrl: String
  coverImage: String
  seoTitle: String
  seoDescription: String
  wordCount: Int
  author: User!
  comments(first: Int, after: String): [Comment!]!
}

type User implements Node {
  id: ID!
  name: String!
  posts(first: Int): [Post!]!
  followers(limit: Int, offset: Int): [User!]!
}

type Comment implements Node {
  id: ID!
  body: String!
  author: User!
  replies: [Comment!]!
}

interface Node {
  id: ID!
}

union SearchResult = Post | User

enum PostStatus {
  DRAFT
  PUBLISHED
}
";

/// The twenty scalar fields of `Post`.
pub const POST_SCALAR_FIELDS: [&str; 20] = [
    "id",
    "title",
    "slug",
    "excerpt",
    "body",
    "status",
    "createdAt",
    "updatedAt",
    "publishedAt",
    "viewCount",
    "likeCount",
    "commentCount",
    "readingTime",
    "featured",
    "language",
    "canonicalUrl",
    "coverImage",
    "seoTitle",
    "seoDescription",
    "wordCount",
];

/// A `post` query selecting the first `count` scalar fields of `Post`.
#[must_use]
pub fn post_query_with_fields(count: usize) -> String {
    let fields = POST_SCALAR_FIELDS[..count.min(POST_SCALAR_FIELDS.len())].join(" ");
    format!("query {{ post(id: \"1\") {{ {fields} }} }}")
}

/// Lists `posts` without any pagination argument.
pub const UNPAGINATED_POSTS: &str = "query { posts { nodes { id } } }";

/// Lists `posts` with `first`.
pub const PAGINATED_POSTS: &str = "query { posts(first: 10) { nodes { id } } }";

/// Two fragments that spread each other, spread from the root.
pub const RECURSIVE_FRAGMENTS: &str = r"
query Recursive {
  viewer { ...A }
}

fragment A on User { ...B }
fragment B on User { ...A }
";

/// A realistic query touching every diagnostic.
pub const FEED_QUERY: &str = r#"
query Feed($withComments: Boolean!, $skipAuthor: Boolean = false) {
  posts(first: 20) {
    nodes {
      ...PostSummary
      author @skip(if: $skipAuthor) {
        name
        followers { name }
      }
      comments @include(if: $withComments) {
        body
        replies { body }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
  search(term: "rust") {
    ... on Post { title }
    ... on User { name }
  }
}

fragment PostSummary on Post {
  id
  title
  excerpt
}
"#;

/// Unbalanced braces.
pub const MALFORMED_QUERY: &str = "query { posts { nodes { id }";
